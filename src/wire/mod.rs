/// JSON wire shapes for the `play-by-play` gamecenter endpoint (§6), consumed
/// by `crate::parse::api_events` (C3). Kept as one flat optional-field bag per
/// event, matching the source API's own loosely-typed `PlayEventDetails`
/// shape (§9).
pub mod api_schema;
