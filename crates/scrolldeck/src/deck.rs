use anyhow::{Context, Result};
use std::path::Path;

/// One slide's text. The navigation core never looks at it; only the
/// renderer does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlideText {
    pub heading: Option<String>,
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deck {
    pub title: Option<String>,
    pub slides: Vec<SlideText>,
}

impl Deck {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Ok(Self::parse(&content))
    }

    pub fn parse(content: &str) -> Self {
        let slides: Vec<SlideText> = split(content)
            .iter()
            .map(|chunk| parse_slide(chunk))
            .collect();
        let title = slides.first().and_then(|s| s.heading.clone());
        Self { title, slides }
    }

    pub fn len(&self) -> usize {
        self.slides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }
}

/// Split a document into raw slide strings on `---` lines.
/// Lines inside fenced code blocks are never treated as separators.
pub fn split(content: &str) -> Vec<String> {
    let content = content.replace("\r\n", "\n");
    let mut slides = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    let mut in_code_fence = false;

    for line in content.lines() {
        let trimmed = line.trim();
        if trimmed.starts_with("```") || trimmed.starts_with("~~~") {
            in_code_fence = !in_code_fence;
        }
        if !in_code_fence && is_dash_separator(trimmed) {
            push_chunk(&mut slides, &current);
            current.clear();
            continue;
        }
        current.push(line);
    }
    push_chunk(&mut slides, &current);
    slides
}

fn push_chunk(slides: &mut Vec<String>, lines: &[&str]) {
    let chunk = lines.join("\n");
    let chunk = chunk.trim();
    if !chunk.is_empty() {
        slides.push(chunk.to_string());
    }
}

fn is_dash_separator(trimmed: &str) -> bool {
    trimmed.len() >= 3 && trimmed.chars().all(|c| c == '-')
}

fn parse_slide(chunk: &str) -> SlideText {
    let mut lines = chunk.lines();
    let first = lines.next().unwrap_or_default();
    if first.starts_with('#') {
        let heading = first.trim_start_matches('#').trim().to_string();
        let body = lines.collect::<Vec<_>>().join("\n").trim().to_string();
        SlideText {
            heading: Some(heading),
            body,
        }
    } else {
        SlideText {
            heading: None,
            body: chunk.to_string(),
        }
    }
}
