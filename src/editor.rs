use crate::movements::Movements;

/// Filter text typed into a gesture field.
///
/// Keeps only directional symbols (case-insensitively), collapses repeated
/// symbols and avoids repeating the last symbol already in the field.
/// Returns the text to insert, which may be empty.
pub fn normalize_gesture_input(existing: &str, inserted: &str, movements: &Movements) -> String {
    let allowed = movements.directional();
    let mut previous = existing.chars().last();
    let mut output = String::new();
    for symbol in inserted.to_uppercase().chars() {
        if !allowed.contains(&symbol) || previous == Some(symbol) {
            continue;
        }
        output.push(symbol);
        previous = Some(symbol);
    }
    output
}
