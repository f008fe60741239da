//! SVG path data assembly.
//!
//! Numbers are written the way JavaScript's `Number#toString()` writes them (shortest
//! round-trippable form, no trailing `.0`), so `68.0` prints as `68`.

use graphdiagram_core::Point;

pub(crate) fn js_number_to_string(mut v: f64, buf: &mut ryu_js::Buffer) -> &str {
    if !v.is_finite() {
        return "0";
    }
    if v == -0.0 {
        v = 0.0;
    }
    buf.format_finite(v)
}

pub fn fmt_number(v: f64) -> String {
    let mut buf = ryu_js::Buffer::new();
    js_number_to_string(v, &mut buf).to_string()
}

/// Builds space-separated path data: `M 7 4 L 68 4 ... Z`.
pub struct PathBuilder {
    out: String,
    buf: ryu_js::Buffer,
}

impl Default for PathBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl PathBuilder {
    pub fn new() -> Self {
        Self {
            out: String::new(),
            buf: ryu_js::Buffer::new(),
        }
    }

    fn command(&mut self, c: char) {
        if !self.out.is_empty() {
            self.out.push(' ');
        }
        self.out.push(c);
    }

    fn number(&mut self, v: f64) {
        self.out.push(' ');
        self.out.push_str(js_number_to_string(v, &mut self.buf));
    }

    fn flag(&mut self, on: bool) {
        self.out.push_str(if on { " 1" } else { " 0" });
    }

    pub fn move_to(mut self, x: f64, y: f64) -> Self {
        self.command('M');
        self.number(x);
        self.number(y);
        self
    }

    pub fn line_to(mut self, x: f64, y: f64) -> Self {
        self.command('L');
        self.number(x);
        self.number(y);
        self
    }

    pub fn move_to_point(self, p: Point) -> Self {
        self.move_to(p.x, p.y)
    }

    pub fn line_to_point(self, p: Point) -> Self {
        self.line_to(p.x, p.y)
    }

    /// Circular arc (`rx == ry == radius`, no axis rotation).
    pub fn arc_to(mut self, radius: f64, large_arc: bool, sweep: bool, x: f64, y: f64) -> Self {
        self.command('A');
        self.number(radius);
        self.number(radius);
        self.number(0.0);
        self.flag(large_arc);
        self.flag(sweep);
        self.number(x);
        self.number(y);
        self
    }

    pub fn arc_to_point(self, radius: f64, large_arc: bool, sweep: bool, p: Point) -> Self {
        self.arc_to(radius, large_arc, sweep, p.x, p.y)
    }

    pub fn close(mut self) -> Self {
        self.command('Z');
        self
    }

    pub fn finish(self) -> String {
        self.out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_print_like_javascript() {
        assert_eq!(fmt_number(68.0), "68");
        assert_eq!(fmt_number(-4.0), "-4");
        assert_eq!(fmt_number(-0.0), "0");
        assert_eq!(fmt_number(0.5), "0.5");
        assert_eq!(fmt_number(f64::NAN), "0");
    }

    #[test]
    fn commands_are_space_separated() {
        let d = PathBuilder::new()
            .move_to(0.0, 0.0)
            .line_to(30.0, 20.0)
            .arc_to(10.0, false, true, 127.0, 30.0)
            .close()
            .finish();
        assert_eq!(d, "M 0 0 L 30 20 A 10 10 0 0 1 127 30 Z");
    }
}
