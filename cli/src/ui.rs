/// Decoration put around every reply printed by the line REPL.
pub struct Framing {
    indent: String,
    rule: String,
}

impl Default for Framing {
    fn default() -> Self {
        Self {
            indent: " ".repeat(5),
            rule: "_".repeat(60),
        }
    }
}

impl Framing {
    pub fn frame(&self, message: &str) -> String {
        let mut out = format!("{}{}\n", self.indent, self.rule);
        for line in message.lines() {
            out.push_str(&self.indent);
            out.push_str(line);
            out.push('\n');
        }
        out.push_str(&format!("{}{}\n", self.indent, self.rule));
        out
    }
}
