use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::sync::Mutex;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextStyle {
    pub font_family: Option<String>,
    pub font_size: f64,
    pub font_weight: Option<String>,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            font_family: None,
            font_size: 16.0,
            font_weight: None,
        }
    }
}

impl TextStyle {
    pub fn new(font_size: f64, font_family: impl Into<String>) -> Self {
        Self {
            font_family: Some(font_family.into()),
            font_size,
            font_weight: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TextMetrics {
    pub width: f64,
    pub height: f64,
    pub line_count: usize,
}

/// Rendered text size provider. Implementations must be deterministic for fixed inputs.
pub trait TextMeasurer {
    fn measure(&self, text: &str, style: &TextStyle) -> TextMetrics;

    fn measure_width(&self, text: &str, style: &TextStyle) -> f64 {
        self.measure(text, style).width
    }
}

/// Fixed-advance measurer: every character is `char_width_factor` em wide.
#[derive(Debug, Clone, Default)]
pub struct DeterministicTextMeasurer {
    pub char_width_factor: f64,
    pub line_height_factor: f64,
}

impl DeterministicTextMeasurer {
    pub fn normalized_text_lines(text: &str) -> Vec<&str> {
        text.split('\n').collect()
    }
}

impl TextMeasurer for DeterministicTextMeasurer {
    fn measure(&self, text: &str, style: &TextStyle) -> TextMetrics {
        let char_width_factor = if self.char_width_factor == 0.0 {
            0.6
        } else {
            self.char_width_factor
        };
        let line_height_factor = if self.line_height_factor == 0.0 {
            1.2
        } else {
            self.line_height_factor
        };

        let lines = Self::normalized_text_lines(text);
        let font_size = style.font_size.max(1.0);
        let max_chars = lines
            .iter()
            .map(|line| line.chars().count())
            .max()
            .unwrap_or(0);

        TextMetrics {
            width: max_chars as f64 * font_size * char_width_factor,
            height: lines.len() as f64 * font_size * line_height_factor,
            line_count: lines.len(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct MeasureKey {
    text: String,
    font_size_bits: u64,
    font_family: Option<String>,
    font_weight: Option<String>,
}

/// Memoizes another measurer by `(text, font)`.
///
/// The cache is transparent: results are identical with a cold or a warm cache.
pub struct CachingTextMeasurer<M> {
    inner: M,
    cache: Mutex<FxHashMap<MeasureKey, TextMetrics>>,
}

impl<M: TextMeasurer> CachingTextMeasurer<M> {
    pub fn new(inner: M) -> Self {
        Self {
            inner,
            cache: Mutex::new(FxHashMap::default()),
        }
    }

    pub fn cached_entries(&self) -> usize {
        self.cache.lock().map(|c| c.len()).unwrap_or(0)
    }

    pub fn into_inner(self) -> M {
        self.inner
    }
}

impl<M: TextMeasurer> TextMeasurer for CachingTextMeasurer<M> {
    fn measure(&self, text: &str, style: &TextStyle) -> TextMetrics {
        let key = MeasureKey {
            text: text.to_string(),
            font_size_bits: style.font_size.to_bits(),
            font_family: style.font_family.clone(),
            font_weight: style.font_weight.clone(),
        };
        // A poisoned cache only loses memoization; measure directly.
        let Ok(mut cache) = self.cache.lock() else {
            return self.inner.measure(text, style);
        };
        *cache
            .entry(key)
            .or_insert_with(|| self.inner.measure(text, style))
    }
}

#[cfg(test)]
mod tests;
