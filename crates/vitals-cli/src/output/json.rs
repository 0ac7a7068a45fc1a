use serde::Serialize;
use vitals_core::error::VitalsError;

pub fn print<T: Serialize>(value: &T) -> Result<(), VitalsError> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{json}");
    Ok(())
}
