use super::*;
use std::cell::Cell;

struct CountingMeasurer {
    calls: Cell<usize>,
}

impl TextMeasurer for CountingMeasurer {
    fn measure(&self, text: &str, style: &TextStyle) -> TextMetrics {
        self.calls.set(self.calls.get() + 1);
        DeterministicTextMeasurer::default().measure(text, style)
    }
}

#[test]
fn deterministic_width_is_chars_times_em_factor() {
    let m = DeterministicTextMeasurer::default();
    let style = TextStyle::new(10.0, "sans-serif");
    let metrics = m.measure("abcd", &style);
    assert_eq!(metrics.width, 24.0);
    assert_eq!(metrics.line_count, 1);
    assert_eq!(m.measure_width("", &style), 0.0);
}

#[test]
fn multi_line_text_uses_the_longest_line() {
    let m = DeterministicTextMeasurer {
        char_width_factor: 0.5,
        line_height_factor: 1.0,
    };
    let metrics = m.measure("ab\nabcdef", &TextStyle::new(20.0, "serif"));
    assert_eq!(metrics.width, 60.0);
    assert_eq!(metrics.height, 40.0);
    assert_eq!(metrics.line_count, 2);
}

#[test]
fn cache_is_transparent_and_keyed_by_font() {
    let cached = CachingTextMeasurer::new(CountingMeasurer {
        calls: Cell::new(0),
    });
    let small = TextStyle::new(10.0, "sans-serif");
    let large = TextStyle::new(20.0, "sans-serif");

    let cold = cached.measure("Neo4j", &small);
    let warm = cached.measure("Neo4j", &small);
    assert_eq!(cold, warm);
    assert_eq!(cold, DeterministicTextMeasurer::default().measure("Neo4j", &small));

    let other = cached.measure("Neo4j", &large);
    assert_ne!(other.width, cold.width);
    assert_eq!(cached.cached_entries(), 2);
    assert_eq!(cached.into_inner().calls.get(), 2);
}
