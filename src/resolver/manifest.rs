use crate::models::LicenseField;

/// Separator used when a manifest lists several licenses.
pub const LIST_SEPARATOR: &str = " OR ";

/// Turn a manifest license declaration into an identifier.
///
/// A single-element list yields that element's type; longer lists are joined
/// with [`LIST_SEPARATOR`].
pub fn identifier(field: &LicenseField) -> Option<String> {
    match field {
        LicenseField::Text(text) => Some(text.clone()),
        LicenseField::Typed(kind) => Some(kind.clone()),
        LicenseField::List(items) => match items.as_slice() {
            [] => None,
            [single] => identifier(single),
            many => {
                let ids: Vec<String> = many.iter().filter_map(identifier).collect();
                (!ids.is_empty()).then(|| ids.join(LIST_SEPARATOR))
            }
        },
    }
}
