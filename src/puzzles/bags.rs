//! Three beauty queens, three suitcases and three destinations.

use crate::error::Result;
use crate::modeling::{ConstraintSet, Constant, Domain, Function, Model, Projection};
use crate::puzzles::Puzzle;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Domain)]
pub enum Girl {
    Savannah,
    Gloria,
    Carmelita,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Domain)]
pub enum Bag {
    Green,
    Black,
    Yellow,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Domain)]
pub enum Dest {
    France,
    Panama,
    America,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Domain)]
pub enum Title {
    MsFrance,
    MsPanama,
    MsAmerica,
}

#[derive(Debug, Clone)]
pub struct Bags {
    pub bag: Function<Girl, Bag>,
    pub dest: Function<Girl, Dest>,
    pub title: Function<Girl, Title>,
    pub yellow_case: Constant<Girl>,
}

impl Puzzle for Bags {
    const NAME: &'static str = "bags";
    type Subject = Girl;

    fn build() -> Result<(ConstraintSet, Self)> {
        let cs = ConstraintSet::new();
        let (cs, bag) = cs.one_to_one::<Girl, Bag>("bag")?;
        let (cs, dest) = cs.one_to_one::<Girl, Dest>("dest")?;
        let (cs, title) = cs.one_to_one::<Girl, Title>("title")?;

        let (cs, american) = cs.constant::<Girl>("american")?;
        let (cs, french) = cs.constant::<Girl>("french")?;
        let (cs, panamanian) = cs.constant::<Girl>("panamanian")?;
        let (cs, yellow_case) = cs.constant::<Girl>("yellow_case")?;

        // Nobody travels to the country she represents.
        let representative = |cs: ConstraintSet, who: &Constant<Girl>, t: Title, d: Dest| {
            cs.clue(
                format!("{} is {t}", who.name()),
                title.at(who).is(t),
            )
            .clue(
                format!("{} is not going to {d}", who.name()),
                dest.at(who).is_not(d),
            )
        };
        let cs = representative(cs, &american, Title::MsAmerica, Dest::America);
        let cs = representative(cs, &french, Title::MsFrance, Dest::France);
        let cs = representative(cs, &panamanian, Title::MsPanama, Dest::Panama);

        let cs = cs
            .clue("Savannah is not Ms. America", american.is_not(Girl::Savannah))
            .clue(
                "Savannah is not going to America",
                dest.of(Girl::Savannah).is_not(Dest::America),
            )
            .clue(
                "Savannah's bag is not yellow",
                bag.of(Girl::Savannah).is_not(Bag::Yellow),
            )
            .clue(
                "Ms. America has the yellow bag",
                bag.at(&american).is(Bag::Yellow),
            )
            .clue(
                "Carmelita's bag is not black",
                bag.of(Girl::Carmelita).is_not(Bag::Black),
            )
            .clue(
                "the yellow case is the yellow bag",
                bag.at(&yellow_case).is(Bag::Yellow),
            )
            .clue(
                "either the yellow case goes to Panama and Savannah is Ms. America, \
                 or Savannah goes to Panama and the yellow case is Ms. America's",
                (dest.at(&yellow_case).is(Dest::Panama) & american.is(Girl::Savannah))
                    | (dest.of(Girl::Savannah).is(Dest::Panama)
                        & american.term().equals(&yellow_case)),
            )
            .clue("Gloria is not Ms. America", american.is_not(Girl::Gloria))
            .clue(
                "Gloria is not going to France",
                dest.of(Girl::Gloria).is_not(Dest::France),
            )
            .clue(
                "Gloria's bag is not black",
                bag.of(Girl::Gloria).is_not(Bag::Black),
            );

        Ok((
            cs,
            Self {
                bag,
                dest,
                title,
                yellow_case,
            },
        ))
    }

    fn projections(&self) -> Vec<&dyn Projection<Girl>> {
        vec![&self.bag, &self.dest, &self.title]
    }

    fn describe(&self, model: &Model) -> Result<String> {
        let dests = model.table(&self.dest)?;
        let titles = model.table(&self.title)?;
        Ok(model
            .table(&self.bag)?
            .into_iter()
            .zip(dests)
            .zip(titles)
            .map(|(((girl, bag), (_, dest)), (_, title))| {
                format!("{girl} carries the {bag} bag, travels to {dest} and is {title}\n")
            })
            .collect())
    }
}
