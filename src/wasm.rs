//! JavaScript bindings.

use wasm_bindgen::prelude::wasm_bindgen;

use crate::parser::parse_colony;

/// Solve map text and render the schedule, one `turn <n>: ` line per turn.
///
/// Parse and solve failures become a JS `Error` carrying the same message the command line tool prints.
#[wasm_bindgen(js_name = solveMap)]
pub fn solve_map(text: &str) -> Result<String, js_sys::Error> {
    let colony = parse_colony(text).map_err(|err| js_sys::Error::new(&err.to_string()))?;
    let schedule = colony.solve().map_err(|err| js_sys::Error::new(&err.to_string()))?;
    Ok(schedule.to_string())
}
