use crate::color::DEFAULT_BACKGROUND;
use serde::{Deserialize, Serialize};

/// Id carried by a note that has not been stored yet; the store assigns a real one.
pub const NEW_NOTE_ID: i64 = 0;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: i64,
    pub title: String,
    pub body: String,
    pub background_color: String,
    pub background_image_path: Option<String>,
}

/// What a note is rendered on top of.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Background<'a> {
    Color(&'a str),
    Image(&'a str),
}

impl Note {
    /// An unsaved note on the default white background.
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            id: NEW_NOTE_ID,
            title: title.into(),
            body: body.into(),
            background_color: DEFAULT_BACKGROUND.to_string(),
            background_image_path: None,
        }
    }

    pub fn with_background_color(mut self, color: impl Into<String>) -> Self {
        self.background_color = color.into();
        self
    }

    pub fn with_background_image(mut self, path: impl Into<String>) -> Self {
        self.background_image_path = Some(path.into());
        self
    }

    pub fn is_new(&self) -> bool {
        self.id <= NEW_NOTE_ID
    }

    /// The image wins whenever one is set; the color is kept but ignored for rendering.
    pub fn background(&self) -> Background<'_> {
        match &self.background_image_path {
            Some(path) => Background::Image(path),
            None => Background::Color(&self.background_color),
        }
    }
}
