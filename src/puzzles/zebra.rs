//! The zebra puzzle: five houses, five nations, and the question of who drinks
//! water and who owns the zebra.

use crate::error::Result;
use crate::modeling::{
    ConstraintSet, Constant, Domain, Function, IntTerm, Model, Ordinal, Projection, Term,
};
use crate::puzzles::Puzzle;

/// Houses are told apart by colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Domain)]
pub enum House {
    Red,
    Green,
    Ivory,
    Yellow,
    Blue,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Domain)]
pub enum Nation {
    England,
    Spain,
    Ukraine,
    Norway,
    Japan,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Domain)]
pub enum Drink {
    Coffee,
    Tea,
    Milk,
    Juice,
    Water,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Domain)]
pub enum Pet {
    Dog,
    Snails,
    Fox,
    Horse,
    Zebra,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Domain)]
pub enum Smoke {
    OldGold,
    Kools,
    Chesterfields,
    LuckyStrikes,
    Parliaments,
}

/// Place in the row, counted from the left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Domain)]
pub enum Position {
    First,
    Second,
    Third,
    Fourth,
    Fifth,
}

#[derive(Debug, Clone)]
pub struct Zebra {
    pub nationality: Function<House, Nation>,
    pub drinks: Function<House, Drink>,
    pub pet: Function<House, Pet>,
    pub smokes: Function<House, Smoke>,
    pub position: Function<House, Position>,
    pub number: Ordinal<Position>,
    pub water_house: Constant<House>,
    pub zebra_house: Constant<House>,
}

impl Zebra {
    /// Number of `house` counted from the left.
    #[must_use]
    pub fn number_of(&self, house: impl Into<Term<House>>) -> IntTerm {
        self.number.at(self.position.at(house))
    }

    fn describe_house(&self, model: &Model, house: House, last: &str) -> Result<String> {
        let number = model.int(&self.number_of(house))?;
        let nation = model.value(&self.nationality, house)?;
        let smoke = model.value(&self.smokes, house)?;
        Ok(format!(
            "lives in the {house} house\n\
             which is number {number} from the left,\n\
             is from {nation},\n\
             smokes {smoke},\n\
             {last}\n"
        ))
    }
}

impl Puzzle for Zebra {
    const NAME: &'static str = "zebra";
    type Subject = House;

    fn build() -> Result<(ConstraintSet, Self)> {
        let cs = ConstraintSet::new();
        let (cs, nationality) = cs.one_to_one::<House, Nation>("nationality")?;
        let (cs, drinks) = cs.one_to_one::<House, Drink>("drinks")?;
        let (cs, pet) = cs.one_to_one::<House, Pet>("pet")?;
        let (cs, smokes) = cs.one_to_one::<House, Smoke>("smokes")?;
        // There are five houses, one per position.
        let (cs, position) = cs.one_to_one::<House, Position>("position")?;
        let (cs, number) = cs.ordinal::<Position>("number")?;

        let (cs, spaniard) = cs.constant::<House>("the_spaniards_house")?;
        let (cs, ukrainian) = cs.constant::<House>("the_ukrainians_house")?;
        let (cs, old_gold) = cs.constant::<House>("the_oldgold_house")?;
        let (cs, middle) = cs.constant::<House>("the_middle_house")?;
        let (cs, first) = cs.constant::<House>("the_first_house")?;
        let (cs, chesterfields) = cs.constant::<House>("the_chesterfield_house")?;
        let (cs, fox) = cs.constant::<House>("the_fox_house")?;
        let (cs, kools) = cs.constant::<House>("the_kools_house")?;
        let (cs, horse) = cs.constant::<House>("the_horse_house")?;
        let (cs, lucky_strikes) = cs.constant::<House>("the_luckystrikes_house")?;
        let (cs, japanese) = cs.constant::<House>("the_japanese_house")?;
        let (cs, norwegian) = cs.constant::<House>("the_norwegian_house")?;
        let (cs, water_house) = cs.constant::<House>("the_water_house")?;
        let (cs, zebra_house) = cs.constant::<House>("the_zebra_house")?;

        let puzzle = Self {
            nationality,
            drinks,
            pet,
            smokes,
            position,
            number,
            water_house,
            zebra_house,
        };
        let Self {
            nationality,
            drinks,
            pet,
            smokes,
            ..
        } = &puzzle;
        let number_of = |house: &Constant<House>| puzzle.number_of(house);

        let cs = cs
            .clue(
                "the Englishman lives in the red house",
                nationality.is(House::Red, Nation::England),
            )
            .clue(
                "the Spaniard owns the dog",
                nationality.at(&spaniard).is(Nation::Spain) & pet.at(&spaniard).is(Pet::Dog),
            )
            .clue(
                "coffee is drunk in the green house",
                drinks.is(House::Green, Drink::Coffee),
            )
            .clue(
                "the Ukrainian drinks tea",
                nationality.at(&ukrainian).is(Nation::Ukraine)
                    & drinks.at(&ukrainian).is(Drink::Tea),
            )
            .clue(
                "the green house is immediately to the right of the ivory house",
                puzzle
                    .number_of(House::Green)
                    .equals(&puzzle.number_of(House::Ivory).plus(1)),
            )
            .clue(
                "the Old Gold smoker owns snails",
                smokes.at(&old_gold).is(Smoke::OldGold) & pet.at(&old_gold).is(Pet::Snails),
            )
            .clue(
                "Kools are smoked in the yellow house",
                smokes.is(House::Yellow, Smoke::Kools),
            )
            .clue(
                "milk is drunk in the middle house",
                number_of(&middle).is(3) & drinks.at(&middle).is(Drink::Milk),
            )
            .clue(
                "the Norwegian lives in the first house",
                number_of(&first).is(1) & nationality.at(&first).is(Nation::Norway),
            )
            .clue(
                "the Chesterfields smoker lives next to the man with the fox",
                smokes.at(&chesterfields).is(Smoke::Chesterfields)
                    & pet.at(&fox).is(Pet::Fox)
                    & number_of(&fox).next_to(&number_of(&chesterfields)),
            )
            .clue(
                "Kools are smoked next to the house where the horse is kept",
                smokes.at(&kools).is(Smoke::Kools)
                    & pet.at(&horse).is(Pet::Horse)
                    & number_of(&horse).next_to(&number_of(&kools)),
            )
            .clue(
                "the Lucky Strike smoker drinks orange juice",
                smokes.at(&lucky_strikes).is(Smoke::LuckyStrikes)
                    & drinks.at(&lucky_strikes).is(Drink::Juice),
            )
            .clue(
                "the Japanese smokes Parliaments",
                nationality.at(&japanese).is(Nation::Japan)
                    & smokes.at(&japanese).is(Smoke::Parliaments),
            )
            .clue(
                "the Norwegian lives next to the blue house",
                nationality.at(&norwegian).is(Nation::Norway)
                    & number_of(&norwegian).next_to(&puzzle.number_of(House::Blue)),
            )
            .clue(
                "somebody drinks water",
                drinks.at(&puzzle.water_house).is(Drink::Water),
            )
            .clue(
                "somebody owns the zebra",
                pet.at(&puzzle.zebra_house).is(Pet::Zebra),
            );

        Ok((cs, puzzle))
    }

    fn projections(&self) -> Vec<&dyn Projection<House>> {
        vec![
            &self.nationality,
            &self.drinks,
            &self.pet,
            &self.smokes,
            &self.position,
        ]
    }

    fn describe(&self, model: &Model) -> Result<String> {
        let water = model.constant(&self.water_house)?;
        let zebra = model.constant(&self.zebra_house)?;
        let mut out = String::new();

        out.push_str("The person who drinks water\n");
        let pet = model.value(&self.pet, water)?;
        out.push_str(&self.describe_house(model, water, &format!("and has (a) pet {pet}."))?);

        out.push_str("\nThe person with the zebra\n");
        let drink = model.value(&self.drinks, zebra)?;
        out.push_str(&self.describe_house(model, zebra, &format!("and drinks {drink}."))?);
        Ok(out)
    }
}
