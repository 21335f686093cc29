//! Mood identifiers and the mood display catalog.
//!
//! # Responsibility
//! - Define the closed set of moods a diary entry can record.
//! - Resolve moods to display metadata through an immutable catalog.
//!
//! # Invariants
//! - `MoodId` is a closed set; unknown identifiers never enter the domain.
//! - Catalog lookups are pure and the catalog is never mutated after
//!   construction.

use serde::{Deserialize, Serialize};

/// Calendar highlight used when the selected date has no saved mood.
pub const DEFAULT_HIGHLIGHT_COLOR: &str = "#1755b2";

/// Closed set of moods a diary entry can record.
///
/// Serialized with the lowercase identifier (`feliz`, `calmo`, ...), which
/// is also the stable form used in persisted blobs and FFI payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoodId {
    Feliz,
    Calmo,
    Relaxado,
    Raiva,
    Triste,
}

impl MoodId {
    /// Stable identifier for blobs and FFI payloads.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Feliz => "feliz",
            Self::Calmo => "calmo",
            Self::Relaxado => "relaxado",
            Self::Raiva => "raiva",
            Self::Triste => "triste",
        }
    }

    /// Parses a stable identifier back into the closed set.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "feliz" => Some(Self::Feliz),
            "calmo" => Some(Self::Calmo),
            "relaxado" => Some(Self::Relaxado),
            "raiva" => Some(Self::Raiva),
            "triste" => Some(Self::Triste),
            _ => None,
        }
    }
}

/// Display and guidance metadata for one mood.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoodSpec {
    pub id: MoodId,
    /// Picker button label.
    pub label: &'static str,
    /// Calendar dot and highlight color.
    pub color: &'static str,
    /// Picker image resolved by the asset collaborator.
    pub image_asset: &'static str,
    /// Line shown in the diary editor once this mood is picked.
    pub encouragement: &'static str,
}

const BUILTIN_MOODS: &[MoodSpec] = &[
    MoodSpec {
        id: MoodId::Feliz,
        label: "Feliz",
        color: "#E91E63",
        image_asset: "assets/moods/Happy.png",
        encouragement: "Que bom te ver feliz! Guarde essa sensação.",
    },
    MoodSpec {
        id: MoodId::Calmo,
        label: "Calmo",
        color: "#9C27B0",
        image_asset: "assets/moods/Calm.png",
        encouragement: "A calma é um refúgio. Descreva sua paz.",
    },
    MoodSpec {
        id: MoodId::Relaxado,
        label: "Relaxado",
        color: "#4DD0E1",
        image_asset: "assets/moods/Relax.png",
        encouragement: "Relaxe e deixe fluir. Todos os sentimentos são válidos.",
    },
    MoodSpec {
        id: MoodId::Raiva,
        label: "Raiva",
        color: "#FF9800",
        image_asset: "assets/moods/Angry.png",
        encouragement: "Sua raiva é válida. Escrever pode ajudar a processá-la.",
    },
    MoodSpec {
        id: MoodId::Triste,
        label: "Triste",
        color: "#8BC34A",
        image_asset: "assets/moods/Sad.png",
        encouragement: "Você merece acolhimento. Compartilhe como se sente.",
    },
];

/// Immutable lookup table mapping moods to display metadata.
///
/// Injected into the diary flows at initialization so lookups stay pure
/// functions over one table instead of scattered constants.
#[derive(Debug, Clone)]
pub struct MoodCatalog {
    specs: &'static [MoodSpec],
    default_highlight: &'static str,
}

impl MoodCatalog {
    /// Catalog shipped with the app.
    pub fn builtin() -> Self {
        Self {
            specs: BUILTIN_MOODS,
            default_highlight: DEFAULT_HIGHLIGHT_COLOR,
        }
    }

    /// All moods in picker display order.
    pub fn specs(&self) -> &[MoodSpec] {
        self.specs
    }

    /// Metadata for one mood, when present in this catalog.
    pub fn spec(&self, id: MoodId) -> Option<&MoodSpec> {
        self.specs.iter().find(|spec| spec.id == id)
    }

    /// Display color for one mood, when present in this catalog.
    pub fn color(&self, id: MoodId) -> Option<&'static str> {
        self.spec(id).map(|spec| spec.color)
    }

    /// Encouragement line for one mood, when present in this catalog.
    pub fn encouragement(&self, id: MoodId) -> Option<&'static str> {
        self.spec(id).map(|spec| spec.encouragement)
    }

    /// Highlight color for a possibly-absent mood, with the default
    /// fallback the calendar uses before any mood is saved.
    pub fn highlight_color(&self, mood: Option<MoodId>) -> &'static str {
        mood.and_then(|id| self.color(id))
            .unwrap_or(self.default_highlight)
    }
}

impl Default for MoodCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}
