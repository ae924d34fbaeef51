//! Table reservation subcommand.

use chrono::NaiveDate;
use pink_plate_core::ReservationRequest;
use pink_plate_storefront::Result;
use tracing::info;

/// Validate a booking against `today` and print the confirmation.
///
/// # Errors
///
/// Returns the first failing field check.
pub fn reserve(request: &ReservationRequest, today: NaiveDate) -> Result<()> {
    request.validate(today)?;
    info!(
        date = %request.date,
        slot = %request.time_slot,
        guests = request.guests.get(),
        "Reservation accepted"
    );

    println!(
        "Table for {} booked for {} on {} at {}",
        request.guests,
        request.name.trim(),
        request.date.format("%A, %-d %B %Y"),
        request.time_slot.trim()
    );
    println!("  Confirmation will be sent to {}", request.email.trim());
    if !request.phone.is_empty() {
        println!("  Phone: {}", request.phone);
    }
    if !request.special_requests.is_empty() {
        println!("  Requests: {}", request.special_requests);
    }
    Ok(())
}
