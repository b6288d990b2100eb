//! Five kids, two scoops each, five pick-up times.

use crate::error::Result;
use crate::modeling::{ConstraintSet, Domain, Function, Model, Ordinal, Projection};
use crate::puzzles::Puzzle;
use crate::sat::expr::{Formula, forall};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Domain)]
pub enum Kid {
    Antony,
    Philip,
    George,
    Luc,
    Steven,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Domain)]
pub enum Flavor {
    Chocolate,
    Hazelnut,
    Strawberry,
    Vanilla,
    Watermelon,
    Coconut,
    Pistachio,
}

impl Flavor {
    pub const FRUIT: [Self; 2] = [Self::Watermelon, Self::Strawberry];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Domain)]
pub enum Time {
    #[domain(rename = "4:00")]
    T400,
    #[domain(rename = "4:30")]
    T430,
    #[domain(rename = "5:00")]
    T500,
    #[domain(rename = "5:30")]
    T530,
    #[domain(rename = "6:00")]
    T600,
}

#[derive(Debug, Clone)]
pub struct IceCream {
    pub first_flavor: Function<Kid, Flavor>,
    pub second_flavor: Function<Kid, Flavor>,
    pub time: Function<Kid, Time>,
    pub time_ordinal: Ordinal<Time>,
}

impl IceCream {
    fn both_fruit(&self, kid: Kid) -> Formula {
        self.first_flavor.of(kid).is_any(&Flavor::FRUIT)
            & self.second_flavor.of(kid).is_any(&Flavor::FRUIT)
    }
}

impl Puzzle for IceCream {
    const NAME: &'static str = "ice-cream";
    const ENUMERATE: bool = true;
    type Subject = Kid;

    fn build() -> Result<(ConstraintSet, Self)> {
        let cs = ConstraintSet::new();
        let (cs, time_ordinal) = cs.ordinal::<Time>("time_ordinal")?;
        let (cs, first_flavor) = cs.one_to_one::<Kid, Flavor>("first_flavor")?;
        let (cs, second_flavor) = cs.one_to_one::<Kid, Flavor>("second_flavor")?;
        let (cs, time) = cs.one_to_one::<Kid, Time>("time")?;
        let (cs, hazelnut_chocolate) = cs.constant::<Kid>("hazelnut_chocolate")?;
        let (cs, t400_kid) = cs.constant::<Kid>("t400_kid")?;
        let (cs, t600_kid) = cs.constant::<Kid>("t600_kid")?;

        let puzzle = Self {
            first_flavor,
            second_flavor,
            time,
            time_ordinal,
        };
        let Self {
            first_flavor,
            second_flavor,
            time,
            time_ordinal,
        } = &puzzle;
        let george_time = time_ordinal.at(time.of(Kid::George));
        let steven_time = time_ordinal.at(time.of(Kid::Steven));

        let cs = cs
            .clue(
                "coconut and pistachio are never a first scoop",
                forall(Kid::ALL, |k| {
                    first_flavor
                        .of(k)
                        .is_any(&[Flavor::Coconut, Flavor::Pistachio])
                        .negate()
                }),
            )
            .clue(
                "hazelnut and vanilla are never a second scoop",
                forall(Kid::ALL, |k| {
                    second_flavor
                        .of(k)
                        .is_any(&[Flavor::Hazelnut, Flavor::Vanilla])
                        .negate()
                }),
            )
            .clue(
                "only George has two fruit flavors",
                forall(Kid::ALL, |k| {
                    let both = puzzle.both_fruit(k);
                    if k == Kid::George { both } else { !both }
                }),
            )
            .clue(
                "George is picked up before Steven",
                george_time.less_than(&steven_time),
            )
            .clue(
                "George is picked up an hour after Luc",
                george_time.equals(&time_ordinal.at(time.of(Kid::Luc)).plus(2)),
            )
            .clue(
                "Philip starts with watermelon or vanilla",
                first_flavor
                    .of(Kid::Philip)
                    .is_any(&[Flavor::Watermelon, Flavor::Vanilla]),
            )
            .clue(
                "Philip finishes with coconut or chocolate",
                second_flavor
                    .of(Kid::Philip)
                    .is_any(&[Flavor::Coconut, Flavor::Chocolate]),
            )
            .clue(
                "someone has hazelnut then chocolate, an hour before Steven",
                first_flavor.at(&hazelnut_chocolate).is(Flavor::Hazelnut)
                    & second_flavor.at(&hazelnut_chocolate).is(Flavor::Chocolate)
                    & time_ordinal
                        .at(time.at(&hazelnut_chocolate))
                        .plus(2)
                        .equals(&steven_time),
            )
            .clue(
                "the 4:00 kid finishes with pistachio and did not start with vanilla or watermelon",
                time.at(&t400_kid).is(Time::T400)
                    & second_flavor.at(&t400_kid).is(Flavor::Pistachio)
                    & first_flavor
                        .at(&t400_kid)
                        .is_any(&[Flavor::Vanilla, Flavor::Watermelon])
                        .negate(),
            )
            .clue(
                "Steven finishes with strawberry",
                second_flavor.is(Kid::Steven, Flavor::Strawberry),
            )
            .clue(
                "the 6:00 kid finishes with coconut",
                time.at(&t600_kid).is(Time::T600) & second_flavor.at(&t600_kid).is(Flavor::Coconut),
            )
            .clue(
                "nobody combines chocolate and strawberry",
                forall(Kid::ALL, |k| {
                    let pair = |a, b| first_flavor.is(k, a) & second_flavor.is(k, b);
                    !(pair(Flavor::Chocolate, Flavor::Strawberry)
                        | pair(Flavor::Strawberry, Flavor::Chocolate))
                }),
            );

        Ok((cs, puzzle))
    }

    fn projections(&self) -> Vec<&dyn Projection<Kid>> {
        vec![&self.first_flavor, &self.second_flavor, &self.time]
    }

    fn describe(&self, model: &Model) -> Result<String> {
        Kid::ALL
            .iter()
            .map(|&kid| {
                Ok(format!(
                    "{kid} has {} then {} at {}\n",
                    model.value(&self.first_flavor, kid)?,
                    model.value(&self.second_flavor, kid)?,
                    model.value(&self.time, kid)?,
                ))
            })
            .collect()
    }
}
