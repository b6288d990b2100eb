use crate::error::{Error, Result};
use std::fmt::{Debug, Display};
use std::hash::Hash;

/// A finite, closed sort of named atomic values.
///
/// Implemented by fieldless enums, normally through `#[derive(Domain)]`.
/// `ALL` lists the elements in declaration order and `index` is the position
/// of an element within it.
pub trait Domain: Copy + Eq + Hash + Debug + Display + 'static {
    /// Name of the sort, e.g. `"House"`.
    const NAME: &'static str;

    /// Every element, in declaration order.
    const ALL: &'static [Self];

    fn index(self) -> usize;

    /// Name of the element, e.g. `"ivory"`.
    fn name(self) -> &'static str;

    #[must_use]
    fn size() -> usize {
        Self::ALL.len()
    }

    /// 1-based position in declaration order.
    #[must_use]
    #[allow(clippy::cast_possible_wrap)]
    fn ordinal(self) -> i64 {
        self.index() as i64 + 1
    }
}

pub(crate) fn ensure_inhabited<D: Domain>() -> Result<()> {
    if D::ALL.is_empty() {
        Err(Error::EmptyDomain(D::NAME))
    } else {
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::modeling::Domain;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Domain)]
    pub(crate) enum Color {
        Red,
        Green,
        DarkBlue,
        #[domain(rename = "off-white")]
        OffWhite,
    }

    /// Hand-written implementation of a sort without elements.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub(crate) enum Nothing {}

    impl Display for Nothing {
        fn fmt(&self, _: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            match *self {}
        }
    }

    impl Domain for Nothing {
        const NAME: &'static str = "Nothing";
        const ALL: &'static [Self] = &[];

        fn index(self) -> usize {
            match self {}
        }

        fn name(self) -> &'static str {
            match self {}
        }
    }

    #[test]
    fn test_derive_lists_elements_in_order() {
        assert_eq!(
            Color::ALL,
            &[Color::Red, Color::Green, Color::DarkBlue, Color::OffWhite]
        );
        for (i, c) in Color::ALL.iter().enumerate() {
            assert_eq!(c.index(), i);
        }
        assert_eq!(Color::size(), 4);
        assert_eq!(Color::NAME, "Color");
    }

    #[test]
    fn test_derive_names() {
        assert_eq!(Color::Red.name(), "red");
        assert_eq!(Color::DarkBlue.name(), "dark_blue");
        assert_eq!(Color::OffWhite.to_string(), "off-white");
    }

    #[test]
    fn test_ordinal_is_one_based() {
        let ordinals: Vec<i64> = Color::ALL.iter().map(|c| c.ordinal()).collect();
        assert_eq!(ordinals, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_empty_domain_is_rejected() {
        assert!(ensure_inhabited::<Color>().is_ok());
        assert!(matches!(
            ensure_inhabited::<Nothing>(),
            Err(Error::EmptyDomain("Nothing"))
        ));
    }
}
