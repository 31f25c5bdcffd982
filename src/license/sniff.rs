/// Phrases identifying well-known license texts, checked in order against
/// lowercased, whitespace-collapsed text. Every phrase must be present.
const SIGNATURES: &[(&str, &[&str])] = &[
    ("Apache-2.0", &["apache license", "version 2.0"]),
    ("LGPL-3.0", &["gnu lesser general public license version 3"]),
    ("LGPL-2.1", &["gnu lesser general public license version 2.1"]),
    ("GPL-3.0", &["gnu general public license version 3"]),
    ("GPL-2.0", &["gnu general public license version 2"]),
    ("MPL-2.0", &["mozilla public license version 2.0"]),
    ("Unlicense", &["free and unencumbered software released into the public domain"]),
    ("MIT", &["permission is hereby granted, free of charge"]),
    (
        "BSD-3-Clause",
        &["redistribution and use in source and binary forms", "neither the name"],
    ),
    ("BSD-2-Clause", &["redistribution and use in source and binary forms"]),
    (
        "0BSD",
        &["permission to use, copy, modify, and/or distribute this software for any purpose with or without fee is hereby granted."],
    ),
    (
        "ISC",
        &["permission to use, copy, modify, and/or distribute this software for any purpose with or without fee is hereby granted, provided"],
    ),
    ("ISC", &["permission to use, copy, modify, and distribute this software for any purpose"]),
];

/// Best-effort identifier for the text of a license file.
pub fn short_name(text: &str) -> Option<&'static str> {
    let normalized = text
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase();

    SIGNATURES
        .iter()
        .find(|(_, phrases)| phrases.iter().all(|p| normalized.contains(p)))
        .map(|(id, _)| *id)
}
