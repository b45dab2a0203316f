//! Building-name normalization.

/// Shorthand → canonical name. Order matters: the first key found in the
/// name wins, and its replacement stands for the whole name.
pub const REPLACEMENTS: &[(&str, &str)] = &[
    ("shannon lib", "shannon library"),
    ("clemons lib", "clemons library"),
    ("brown lib", "brown science & engineering library"),
    ("ohill", "o'hill dining hall"),
    ("o hill", "o'hill dining hall"),
    ("newcomb", "newcomb hall"),
    ("rotunda", "the rotunda"),
    ("lawn", "the lawn"),
    ("old cabell", "old cabell hall"),
    ("new cabell", "new cabell hall"),
    ("rice", "rice hall"),
    ("olsson", "olsson hall"),
    ("thornton", "thornton hall"),
    ("jpa", "john paul jones arena"),
    ("jpj", "john paul jones arena"),
    ("scott", "scott stadium"),
    ("cobb", "cobb hall"),
    ("rouss", "rouss-robertson hall (mcintire)"),
    ("robertson", "rouss-robertson hall (mcintire)"),
    ("physics", "physics building"),
    ("chemistry", "chemistry building"),
    ("meb", "mechanical engineering building"),
    ("msb", "materials science building (msb)"),
];

/// Lowercase, trim, then collapse known shorthands to their canonical name.
pub fn normalize_building_name(name: &str) -> String {
    let lowered = name.trim().to_lowercase();

    REPLACEMENTS
        .iter()
        .find(|(key, _)| lowered.contains(key))
        .map(|(_, canonical)| (*canonical).to_string())
        .unwrap_or(lowered)
}
