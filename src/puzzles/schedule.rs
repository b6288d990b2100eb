//! A school morning: four periods, each with a class, a teacher and a room.

use crate::error::Result;
use crate::modeling::{ConstraintSet, Domain, Function, Model, Ordinal, Projection};
use crate::puzzles::Puzzle;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Domain)]
pub enum Period {
    First,
    Second,
    Third,
    Fourth,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Domain)]
pub enum Class {
    Algebra,
    Art,
    Chem,
    English,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Domain)]
pub enum Teacher {
    Mason,
    Schiller,
    Thomlinson,
    Xavier,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Domain)]
pub enum Room {
    #[domain(rename = "112")]
    R112,
    #[domain(rename = "113")]
    R113,
    #[domain(rename = "115")]
    R115,
    #[domain(rename = "218")]
    R218,
}

#[derive(Debug, Clone)]
pub struct Schedule {
    pub class: Function<Period, Class>,
    pub teacher: Function<Period, Teacher>,
    pub room: Function<Period, Room>,
    pub period_ordinal: Ordinal<Period>,
}

impl Puzzle for Schedule {
    const NAME: &'static str = "schedule";
    const ENUMERATE: bool = true;
    type Subject = Period;

    fn build() -> Result<(ConstraintSet, Self)> {
        let cs = ConstraintSet::new();
        let (cs, period_ordinal) = cs.ordinal::<Period>("period_ordinal")?;
        let (cs, class) = cs.one_to_one::<Period, Class>("class")?;
        let (cs, teacher) = cs.one_to_one::<Period, Teacher>("teacher")?;
        let (cs, room) = cs.one_to_one::<Period, Room>("room")?;

        let (cs, room218) = cs.constant::<Period>("room218_period")?;
        let (cs, mason) = cs.constant::<Period>("mason_period")?;
        let (cs, room112) = cs.constant::<Period>("room112_period")?;
        let (cs, xavier) = cs.constant::<Period>("xavier_period")?;
        let (cs, art) = cs.constant::<Period>("art_period")?;
        let (cs, english) = cs.constant::<Period>("english_period")?;
        let (cs, schiller) = cs.constant::<Period>("schiller_period")?;
        let (cs, algebra) = cs.constant::<Period>("alg_period")?;

        let cs = cs
            .clue(
                "room 218 is used before Mason teaches",
                room.at(&room218).is(Room::R218)
                    & teacher.at(&mason).is(Teacher::Mason)
                    & period_ordinal
                        .at(&room218)
                        .less_than(&period_ordinal.at(&mason)),
            )
            .clue(
                "room 112 is used the period after Xavier teaches",
                room.at(&room112).is(Room::R112)
                    & teacher.at(&xavier).is(Teacher::Xavier)
                    & period_ordinal
                        .at(&room112)
                        .equals(&period_ordinal.at(&xavier).plus(1)),
            )
            .clue(
                "art is not in room 112, and the fourth period is neither art nor in room 112",
                class.at(&art).is(Class::Art)
                    & room.at(&art).is_not(Room::R112)
                    & class.of(Period::Fourth).is_not(Class::Art)
                    & room.of(Period::Fourth).is_not(Room::R112),
            )
            .clue(
                "chemistry is fourth period",
                class.is(Period::Fourth, Class::Chem),
            )
            .clue(
                "either Thomlinson teaches art or art is third period, not both",
                teacher
                    .at(&art)
                    .is(Teacher::Thomlinson)
                    .xor(art.is(Period::Third)),
            )
            .clue(
                "English and Schiller's class are at different periods; \
                 one is in room 113 and the other is first",
                class.at(&english).is(Class::English)
                    & teacher.at(&schiller).is(Teacher::Schiller)
                    & english.term().differs(&schiller)
                    & ((room.at(&english).is(Room::R113) & schiller.is(Period::First))
                        | (room.at(&schiller).is(Room::R113) & english.is(Period::First))),
            )
            .clue(
                "Thomlinson does not teach algebra",
                class.at(&algebra).is(Class::Algebra)
                    & teacher.at(&algebra).is_not(Teacher::Thomlinson),
            );

        Ok((
            cs,
            Self {
                class,
                teacher,
                room,
                period_ordinal,
            },
        ))
    }

    fn projections(&self) -> Vec<&dyn Projection<Period>> {
        vec![&self.teacher, &self.room, &self.class]
    }

    fn describe(&self, model: &Model) -> Result<String> {
        Period::ALL
            .iter()
            .map(|&period| {
                Ok(format!(
                    "period {}: {} with {} in room {}\n",
                    self.period_ordinal.value(period),
                    model.value(&self.class, period)?,
                    model.value(&self.teacher, period)?,
                    model.value(&self.room, period)?,
                ))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fourth_period_is_chemistry_in_every_solution() {
        let (cs, schedule) = Schedule::build().unwrap();
        let solutions = schedule.solutions(&cs).unwrap();
        assert!(!solutions.is_empty());
        for solution in &solutions {
            assert_eq!(solution.get(Period::Fourth, "class"), Some("chem"));
        }
    }

    #[test]
    fn test_timetable() {
        let (cs, schedule) = Schedule::build().unwrap();
        let model = cs.solve().unwrap();
        assert_eq!(
            schedule.describe(&model).unwrap(),
            "period 1: english with xavier in room 218\n\
             period 2: algebra with mason in room 112\n\
             period 3: art with schiller in room 113\n\
             period 4: chem with thomlinson in room 115\n"
        );
    }
}
