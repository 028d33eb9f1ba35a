//! Card identity and deck construction.

use std::fmt;
use std::hash::Hash;

use rustc_hash::FxHashSet;

/// Anything that can sit in a deck. Only the identifier is ever inspected.
pub trait Card: 'static {
    type Id: Clone + Eq + Hash + fmt::Debug;

    fn id(&self) -> Self::Id;
}

/// An ordered list of cards with unique identifiers.
#[derive(Debug, Clone, PartialEq)]
pub struct Deck<T> {
    cards: Vec<T>,
}

impl<T: Card> Deck<T> {
    pub fn from_cards(cards: Vec<T>) -> Result<Self, DeckError<T::Id>> {
        let mut seen = FxHashSet::default();
        for (index, card) in cards.iter().enumerate() {
            let id = card.id();
            if !seen.insert(id.clone()) {
                return Err(DeckError::DuplicateId { id, index });
            }
        }
        Ok(Self { cards })
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.cards.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.cards.iter()
    }

    pub fn position(&self, id: &T::Id) -> Option<usize> {
        self.cards.iter().position(|card| card.id() == *id)
    }

    pub fn into_vec(self) -> Vec<T> {
        self.cards
    }
}

impl<T> From<Deck<T>> for Vec<T> {
    fn from(deck: Deck<T>) -> Self {
        deck.cards
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeckError<Id> {
    DuplicateId { id: Id, index: usize },
}

impl<Id: fmt::Debug> fmt::Display for DeckError<Id> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeckError::DuplicateId { id, index } => {
                write!(f, "card {id:?} at index {index} duplicates an earlier card")
            }
        }
    }
}

impl<Id: fmt::Debug> std::error::Error for DeckError<Id> {}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Photo(&'static str);

    impl Card for Photo {
        type Id = &'static str;

        fn id(&self) -> Self::Id {
            self.0
        }
    }

    #[test]
    fn from_cards_keeps_order() {
        let deck = Deck::from_cards(vec![Photo("a"), Photo("b"), Photo("c")]).unwrap();
        assert_eq!(deck.len(), 3);
        assert_eq!(deck.get(1), Some(&Photo("b")));
        assert_eq!(deck.position(&"c"), Some(2));
        assert_eq!(Vec::from(deck), vec![Photo("a"), Photo("b"), Photo("c")]);
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let err = Deck::from_cards(vec![Photo("a"), Photo("b"), Photo("a")]).unwrap_err();
        assert_eq!(err, DeckError::DuplicateId { id: "a", index: 2 });
        assert_eq!(
            err.to_string(),
            "card \"a\" at index 2 duplicates an earlier card"
        );
    }

    #[test]
    fn empty_deck_is_valid() {
        let deck = Deck::<Photo>::from_cards(Vec::new()).unwrap();
        assert!(deck.is_empty());
    }
}
