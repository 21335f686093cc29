//! Local user profile persisted by the profile screen.

use serde::{Deserialize, Serialize};

/// Shown when a stored profile has no usable name.
pub const DISPLAY_NAME_FALLBACK: &str = "Usuário";

/// Local user profile; the avatar is a device URI owned by the image
/// picker collaborator.
///
/// Serializes as `{"name":"...","avatarUri":...}` to match the stored
/// blob shape.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub avatar_uri: Option<String>,
}

impl UserProfile {
    /// Name for display, falling back when the stored name is blank.
    pub fn display_name(&self) -> &str {
        if self.name.trim().is_empty() {
            DISPLAY_NAME_FALLBACK
        } else {
            &self.name
        }
    }
}
