//! Struct text rendering.

use crate::models::FieldLine;

/// Render one tab-indented field with its `json` and `db` tags.
pub fn render_field_line(line: &FieldLine) -> String {
    format!(
        "\t{} {} `json:\"{}\" db:\"{}\"`",
        line.field_name, line.field_type, line.json_tag, line.column
    )
}

/// Wrap field lines in a `type <name> struct { ... }` block.
///
/// With no fields the result is `type <name> struct {\n}`.
pub fn render_struct(struct_name: &str, fields: &[FieldLine]) -> String {
    let mut out = format!("type {struct_name} struct {{");
    for field in fields {
        out.push('\n');
        out.push_str(&render_field_line(field));
    }
    out.push_str("\n}");
    out
}
