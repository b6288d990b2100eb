//! Four couples and their New Year's resolutions.
//!
//! As transcribed, the clues pin Mr. Humphrey to cooking, the Clarks to the
//! island and the Stills to the car, which leaves the Douglases with the one
//! resolution they are said not to have made. Solving reports that conflict.

use crate::error::Result;
use crate::modeling::{ConstraintSet, Domain, Function, Model, Projection};
use crate::puzzles::Puzzle;
use crate::sat::expr::exists;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Domain)]
pub enum Wife {
    Cindy,
    Mary,
    Pauline,
    Susan,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Domain)]
pub enum Husband {
    George,
    Mick,
    Stanley,
    Todd,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Domain)]
pub enum Resolution {
    Car,
    Cook,
    Island,
    Weight,
}

/// Family name of a couple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Domain)]
pub enum Name {
    Clark,
    Douglas,
    Humphrey,
    Stills,
}

#[derive(Debug, Clone)]
pub struct NewYears {
    pub wife: Function<Name, Wife>,
    pub husband: Function<Name, Husband>,
    pub resolution: Function<Name, Resolution>,
}

impl Puzzle for NewYears {
    const NAME: &'static str = "new-years";
    type Subject = Name;

    fn build() -> Result<(ConstraintSet, Self)> {
        let cs = ConstraintSet::new();
        let (cs, wife) = cs.one_to_one::<Name, Wife>("wife")?;
        let (cs, husband) = cs.one_to_one::<Name, Husband>("husband")?;
        let (cs, resolution) = cs.one_to_one::<Name, Resolution>("resolution")?;
        let (cs, todds) = cs.constant::<Name>("name_clue1")?;
        let (cs, stanleys) = cs.constant::<Name>("name_clue3")?;

        let couple = |n, w, h| wife.is(n, w) & husband.is(n, h);

        let cs = cs
            .clue(
                "Todd resolved to learn to cook",
                husband.at(&todds).is(Husband::Todd)
                    & resolution.at(&todds).is(Resolution::Cook),
            )
            .clue(
                "Mr. Clark is not George",
                husband.of(Name::Clark).is_not(Husband::George),
            )
            .clue(
                "the Clarks resolved to visit the island",
                resolution.is(Name::Clark, Resolution::Island),
            )
            .clue(
                "Mary is not married to Mick",
                !exists(Name::ALL, |n| couple(n, Wife::Mary, Husband::Mick)),
            )
            .clue(
                "one couple is not Stanley's with the car resolution",
                !(husband.at(&stanleys).is(Husband::Stanley)
                    & resolution.at(&stanleys).is(Resolution::Car)),
            )
            .clue("Cindy is Mrs. Douglas", wife.is(Name::Douglas, Wife::Cindy))
            .clue(
                "the Douglases did not resolve to lose weight",
                resolution.of(Name::Douglas).is_not(Resolution::Weight),
            )
            .clue(
                "Susan is not married to George",
                !exists(Name::ALL, |n| couple(n, Wife::Susan, Husband::George)),
            )
            .clue(
                "the Stills resolved to buy a car",
                resolution.is(Name::Stills, Resolution::Car),
            )
            .clue(
                "Mr. Humphrey is Todd",
                husband.is(Name::Humphrey, Husband::Todd),
            )
            .clue(
                "Pauline is neither Mrs. Stills nor Mrs. Humphrey",
                wife.of(Name::Stills).is_not(Wife::Pauline)
                    & wife.of(Name::Humphrey).is_not(Wife::Pauline),
            )
            .clue(
                "Mr. Stills is Stanley",
                husband.is(Name::Stills, Husband::Stanley),
            )
            .clue(
                "Susan is not Mrs. Stills",
                wife.of(Name::Stills).is_not(Wife::Susan),
            );

        Ok((
            cs,
            Self {
                wife,
                husband,
                resolution,
            },
        ))
    }

    fn projections(&self) -> Vec<&dyn Projection<Name>> {
        vec![&self.wife, &self.husband, &self.resolution]
    }

    fn describe(&self, model: &Model) -> Result<String> {
        Name::ALL
            .iter()
            .map(|&name| {
                Ok(format!(
                    "the {name}s, {} and {}, resolved: {}\n",
                    model.value(&self.wife, name)?,
                    model.value(&self.husband, name)?,
                    model.value(&self.resolution, name)?,
                ))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::modeling::Check;

    #[test]
    fn test_conflict_names_the_douglas_and_stills_clues() {
        let (cs, _) = NewYears::build().unwrap();
        let Check::Unsat { clues } = cs.check() else {
            panic!("the transcribed clues should be contradictory");
        };
        assert!(clues.iter().any(|c| c == "the Douglases did not resolve to lose weight"));
        assert!(clues.iter().any(|c| c == "the Stills resolved to buy a car"));
    }

    #[test]
    fn test_dropping_the_weight_clue_restores_a_solution() {
        let (cs, puzzle) = NewYears::build().unwrap();
        let relaxed = cs
            .assertions()
            .iter()
            .filter(|a| a.label.as_deref() != Some("the Douglases did not resolve to lose weight"))
            .fold(ConstraintSet::new(), |acc, a| acc.assert(a.formula.clone()));
        let model = relaxed.solve().unwrap();
        assert_eq!(
            model.value(&puzzle.resolution, Name::Douglas).unwrap(),
            Resolution::Weight
        );
        assert_eq!(model.value(&puzzle.wife, Name::Stills).unwrap(), Wife::Mary);
        assert!(matches!(cs.solve(), Err(Error::Unsatisfiable { .. })));
    }
}
