// ============================================================================
// CSV EXPORT - Filas de una respuesta "table" del chat → texto CSV
// ============================================================================

use csv::{QuoteStyle, Terminator, WriterBuilder};
use serde_json::{Map, Value};

/// Texto de una celda tal y como se muestra en la tabla y en el CSV
pub fn cell_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

/// Cabecera = claves de la primera fila, sin comillas.
/// Cada valor va entre comillas dobles y las comillas internas se escapan como `\"`.
/// Sin filas → `None`.
pub fn rows_to_csv(rows: &[Map<String, Value>]) -> Option<String> {
    let first = rows.first()?;
    let headers: Vec<&str> = first.keys().map(String::as_str).collect();

    // La cabecera no se escapa: claves con `,` o `"` salen tal cual
    let mut out = headers.join(",").into_bytes();
    out.push(b'\n');

    let mut body = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .double_quote(false)
        .escape(b'\\')
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());
    for row in rows {
        let record: Vec<String> = headers.iter().map(|h| cell_text(row.get(*h))).collect();
        if let Err(e) = body.write_record(&record) {
            log::error!("❌ [CSV] Error escribiendo fila: {}", e);
            return None;
        }
    }
    out.extend(body.into_inner().ok()?);

    let mut text = String::from_utf8(out).ok()?;
    if text.ends_with('\n') {
        text.pop();
    }
    Some(text)
}
