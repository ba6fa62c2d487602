//! Console report for a planned itinerary

use domain::entities::Itinerary;

/// Render an itinerary as the leg-by-leg console report
///
/// ```text
/// Route from Pasila to Kauppatori:
///   From: Origin
///   To: Pasila
///   From: Pasila
///   To: Kauppatori
/// ```
#[must_use]
pub fn format_itinerary(itinerary: &Itinerary) -> String {
    let (Some(start), Some(end)) = (itinerary.start_place(), itinerary.end_place()) else {
        return String::from("Itinerary has no legs");
    };

    let mut lines = Vec::with_capacity(1 + itinerary.legs.len() * 2);
    lines.push(format!("Route from {start} to {end}:"));

    for leg in &itinerary.legs {
        lines.push(format!("  From: {}", leg.from));
        lines.push(format!("  To: {}", leg.to));
    }

    lines.join("\n")
}
