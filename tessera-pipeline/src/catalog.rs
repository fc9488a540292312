//! The fixed catalog of source works and artistic media.
//!
//! Both picks are random by design (variety is a feature); the randomness
//! source is injected so tests can pin a selection.
use rand::Rng;

/// Literary and historical works the anecdote stage draws from.
pub const WORKS: &[&str] = &[
    "The Gospels of the New Testament of the King James Bible",
    "The Old Testament of the King James Bible",
    "Edward Gibbon's The History of the Decline and Fall of the Roman Empire",
    "The Poetic Edda",
    "Herodotus's The Histories",
    "The Epic of Gilgamesh",
    "The Mahabharata",
    "Sima Qian's Records of the Grand Historian",
    "Beowulf",
    "Homer's Odyssey",
    "Homer's Iliad",
];

/// Artistic media the image prompt is framed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Medium {
    ReliefSculpture,
    Mosaic,
    Fresco,
    Sculpture,
    Tapestry,
    IlluminatedManuscript,
}

impl Medium {
    pub const ALL: &'static [Medium] = &[
        Medium::ReliefSculpture,
        Medium::Mosaic,
        Medium::Fresco,
        Medium::Sculpture,
        Medium::Tapestry,
        Medium::IlluminatedManuscript,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Medium::ReliefSculpture => "relief sculpture",
            Medium::Mosaic => "mosaic",
            Medium::Fresco => "fresco",
            Medium::Sculpture => "sculpture",
            Medium::Tapestry => "tapestry",
            Medium::IlluminatedManuscript => "illuminated manuscript",
        }
    }
}

pub fn pick_work<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    WORKS[rng.gen_range(0..WORKS.len())]
}

pub fn pick_medium<R: Rng + ?Sized>(rng: &mut R) -> Medium {
    Medium::ALL[rng.gen_range(0..Medium::ALL.len())]
}

/// Frame a scene description in an artistic medium.
pub fn art_prompt(medium: Medium, scene: &str) -> String {
    format!("A {} of {}", medium.as_str(), scene)
}
