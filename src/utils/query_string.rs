//! Parseo de query strings
//!
//! Equivalente a URLSearchParams: decodifica percent-encoding y trata `+`
//! como espacio. Con claves repetidas gana la última.

use std::collections::HashMap;

/// Descompone un query string (con o sin `?` inicial) en pares clave-valor
pub fn parse_query_string(query: &str) -> HashMap<String, String> {
    query
        .trim_start_matches('?')
        .split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| match pair.split_once('=') {
            Some((key, value)) => (decode_component(key), decode_component(value)),
            None => (decode_component(pair), String::new()),
        })
        .collect()
}

fn decode_component(raw: &str) -> String {
    let plus_decoded = raw.replace('+', " ");
    match urlencoding::decode(&plus_decoded) {
        Ok(decoded) => decoded.into_owned(),
        // Un percent-encoding corrupto se conserva tal cual
        Err(_) => plus_decoded,
    }
}
