//! Annotations: styled, possibly multi-line text displayed under a line.

use crate::per_line::PerLine;

/// Styling of an annotation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnnotationStyle {
    /// One style for the whole text.
    Uniform(u8),
    /// One style per byte of text.
    PerByte(Vec<u8>),
}

/// Annotation text and styling owned by one line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Annotation {
    text: String,
    style: AnnotationStyle,
    lines: usize,
}

impl Annotation {
    fn empty(style: AnnotationStyle) -> Self {
        Self {
            text: String::new(),
            style,
            lines: 0,
        }
    }

    /// Annotation text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Annotation styling.
    pub fn style(&self) -> &AnnotationStyle {
        &self.style
    }

    /// Text length in bytes.
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// Check if the annotation has no text.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Number of display lines (`'\n'` count + 1), 0 when only a style was set.
    pub fn lines(&self) -> usize {
        self.lines
    }
}

fn count_lines(text: &str) -> usize {
    text.bytes().filter(|&b| b == b'\n').count() + 1
}

/// Optional annotation for every line.
#[derive(Debug, Clone, Default)]
pub struct LineAnnotation {
    annotations: Vec<Option<Annotation>>,
}

impl LineAnnotation {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    fn ensure_length(&mut self, length: usize) {
        if self.annotations.len() < length {
            self.annotations.resize_with(length, || None);
        }
    }

    fn slot_mut(&mut self, line: usize, total_lines: usize) -> Option<&mut Option<Annotation>> {
        if line >= total_lines {
            return None;
        }
        self.ensure_length(line + 1);
        self.annotations.get_mut(line)
    }

    /// Annotation of `line`.
    pub fn annotation(&self, line: usize) -> Option<&Annotation> {
        self.annotations.get(line).and_then(Option::as_ref)
    }

    /// Check if any line has an annotation.
    pub fn any_annotations(&self) -> bool {
        self.annotations.iter().any(Option::is_some)
    }

    /// Replace the text of `line` in a document with `total_lines` lines; `None` removes the
    /// annotation. Lines outside the document are ignored.
    ///
    /// A uniform style is kept. Per-byte styles are reset to 0 for the new text.
    pub fn set_text(&mut self, line: usize, text: Option<&str>, total_lines: usize) {
        let Some(text) = text else {
            if let Some(slot) = self.annotations.get_mut(line) {
                *slot = None;
            }
            return;
        };

        let Some(slot) = self.slot_mut(line, total_lines) else {
            return;
        };
        let style = match slot.take().map(|annotation| annotation.style) {
            Some(AnnotationStyle::PerByte(_)) => AnnotationStyle::PerByte(vec![0; text.len()]),
            Some(uniform) => uniform,
            None => AnnotationStyle::Uniform(0),
        };
        *slot = Some(Annotation {
            text: text.to_owned(),
            style,
            lines: count_lines(text),
        });
    }

    /// Text of `line`.
    pub fn text(&self, line: usize) -> Option<&str> {
        self.annotation(line).map(Annotation::text)
    }

    /// Set one style for the whole annotation of `line`, creating an empty annotation if needed.
    pub fn set_style(&mut self, line: usize, style: u8, total_lines: usize) {
        let Some(slot) = self.slot_mut(line, total_lines) else {
            return;
        };
        slot.get_or_insert_with(|| Annotation::empty(AnnotationStyle::Uniform(style)))
            .style = AnnotationStyle::Uniform(style);
    }

    /// Set per-byte styles for `line`. `styles` is truncated or padded with 0 to the text length.
    pub fn set_styles(&mut self, line: usize, styles: &[u8], total_lines: usize) {
        let Some(slot) = self.slot_mut(line, total_lines) else {
            return;
        };
        let annotation = slot.get_or_insert_with(|| Annotation::empty(AnnotationStyle::PerByte(Vec::new())));
        let length = annotation.text.len();
        let mut buffer = styles[..styles.len().min(length)].to_vec();
        buffer.resize(length, 0);
        annotation.style = AnnotationStyle::PerByte(buffer);
    }

    /// Uniform style of `line`; 0 when absent or styled per byte.
    pub fn style(&self, line: usize) -> u8 {
        match self.annotation(line).map(Annotation::style) {
            Some(AnnotationStyle::Uniform(style)) => *style,
            _ => 0,
        }
    }

    /// Per-byte styles of `line`.
    pub fn styles(&self, line: usize) -> Option<&[u8]> {
        match self.annotation(line).map(Annotation::style) {
            Some(AnnotationStyle::PerByte(styles)) => Some(styles.as_slice()),
            _ => None,
        }
    }

    /// Check if `line` is styled per byte.
    pub fn multiple_styles(&self, line: usize) -> bool {
        self.styles(line).is_some()
    }

    /// Text length of `line` in bytes.
    pub fn length(&self, line: usize) -> usize {
        self.annotation(line).map_or(0, Annotation::len)
    }

    /// Display lines of `line`'s annotation, 0 when absent.
    pub fn lines(&self, line: usize) -> usize {
        self.annotation(line).map_or(0, Annotation::lines)
    }

    /// Remove every annotation.
    pub fn clear_all(&mut self) {
        self.annotations.clear();
    }
}

impl PerLine for LineAnnotation {
    fn init(&mut self) {
        self.clear_all();
    }

    fn insert_line(&mut self, line: usize) {
        if line < self.annotations.len() {
            self.annotations.insert(line, None);
        }
    }

    fn remove_line(&mut self, line: usize) {
        if line < self.annotations.len() {
            self.annotations.remove(line);
        }
    }
}
