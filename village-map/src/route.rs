//! Route de la page détail : `/village/{id}`
//!
//! L'identifiant est encodé comme `encodeURIComponent` côté carte et décodé
//! côté page détail.

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::VillageMapError;

/// Préfixe de la route détail
pub const DETAIL_PREFIX: &str = "/village/";

/// Caractères laissés tels quels par `encodeURIComponent`
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Encode un identifiant pour un segment de chemin
pub fn encode_id(id: &str) -> String {
    utf8_percent_encode(id, COMPONENT).to_string()
}

/// Décode un segment de chemin
pub fn decode_id(segment: &str) -> Result<String, VillageMapError> {
    percent_decode_str(segment)
        .decode_utf8()
        .map(|s| s.into_owned())
        .map_err(|e| VillageMapError::InvalidRoute(format!("{}: {}", segment, e)))
}

/// Lien vers la page détail d'un village
pub fn detail_href(id: &str) -> String {
    format!("{}{}", DETAIL_PREFIX, encode_id(id))
}

/// Extrait et décode l'identifiant d'un chemin `/village/{id}`
pub fn parse_detail_path(path: &str) -> Result<String, VillageMapError> {
    let segment = path
        .strip_prefix(DETAIL_PREFIX)
        .ok_or_else(|| VillageMapError::InvalidRoute(path.to_string()))?;
    let segment = segment.strip_suffix('/').unwrap_or(segment);

    if segment.is_empty() || segment.contains('/') {
        return Err(VillageMapError::InvalidRoute(path.to_string()));
    }

    decode_id(segment)
}
