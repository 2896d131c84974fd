/// Look up city and state from a US zip code in the bundled database
pub fn lookup_zipcode(zip: &str) -> Option<(String, String)> {
    // Avoid zipcodes::matching to suppress debug_print output.
    let results = zipcodes::filter_by(vec![|z: &zipcodes::Zipcode| z.zip_code == zip], None).ok()?;
    let info = results.first()?;
    Some((info.city.clone(), info.state.clone()))
}

/// "City, ST" label for a ZIP code, shown next to the results.
///
/// Informational only: district resolution never consults it.
pub fn location_label(zip: &str) -> Option<String> {
    lookup_zipcode(zip).map(|(city, state)| format!("{}, {}", city, state))
}
