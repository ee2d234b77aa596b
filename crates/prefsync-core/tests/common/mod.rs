//! Record fixtures shared by the integration tests.
#![allow(dead_code)]

use prefsync_core::{Fields, Record, Result};

#[derive(Debug, Clone, PartialEq)]
pub struct Chapter {
    pub contents: String,
    pub author: String,
}

impl Default for Chapter {
    fn default() -> Self {
        Self {
            contents: String::new(),
            author: "Anonymous".to_string(),
        }
    }
}

impl Record for Chapter {
    fn fields(&mut self, fields: &mut Fields<'_>) -> Result<()> {
        fields.field("contents", &mut self.contents)?;
        fields.field("author", &mut self.author)?;
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Preferences {
    pub last_folder: String,
    pub last_open: u32,
    pub privileged: bool,
    pub zoom: f64,
    pub info: Chapter,
    pub chapters: Vec<Chapter>,
    pub footnotes: Vec<Box<Chapter>>,
    pub draft: Option<Box<Chapter>>,
}

impl Record for Preferences {
    fn fields(&mut self, fields: &mut Fields<'_>) -> Result<()> {
        fields.field("last_folder", &mut self.last_folder)?;
        fields.field("last_open", &mut self.last_open)?;
        fields.field("privileged", &mut self.privileged)?;
        fields.field("zoom", &mut self.zoom)?;
        fields.record("info", &mut self.info)?;
        fields.field("chapters", &mut self.chapters)?;
        fields.field("footnotes", &mut self.footnotes)?;
        fields.field("draft", &mut self.draft)?;
        Ok(())
    }
}

/// A populated `Preferences` touching every field kind.
pub fn sample_preferences() -> Preferences {
    Preferences {
        last_folder: "/home/dugi/books".to_string(),
        last_open: 4,
        privileged: true,
        zoom: 1.25,
        info: Chapter {
            contents: "Preface".to_string(),
            author: "Editor".to_string(),
        },
        chapters: vec![
            Chapter {
                contents: "It was a \"dark\" night".to_string(),
                author: "A".to_string(),
            },
            Chapter {
                contents: "line one\nline two".to_string(),
                author: "B\\C".to_string(),
            },
        ],
        footnotes: vec![Box::new(Chapter {
            contents: "There will be a lot of footnotes".to_string(),
            author: "Dugi".to_string(),
        })],
        draft: Some(Box::new(Chapter::default())),
    }
}

/// A unique path under the system temp directory. The file is not created.
pub fn temp_path(tag: &str) -> std::path::PathBuf {
    use std::sync::atomic::{AtomicUsize, Ordering};
    static COUNTER: AtomicUsize = AtomicUsize::new(0);
    let n = COUNTER.fetch_add(1, Ordering::Relaxed);
    std::env::temp_dir().join(format!(
        "prefsync-{}-{}-{}.json",
        tag,
        std::process::id(),
        n
    ))
}
