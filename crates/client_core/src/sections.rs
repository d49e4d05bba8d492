//! Alphabetical sectioning and row decorations for the contact list.

use std::{cmp::Ordering, collections::BTreeMap};

use shared::domain::Contact;
use unicode_normalization::{char::is_combining_mark, UnicodeNormalization};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AvatarColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl AvatarColor {
    const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

pub const AVATAR_PALETTE: [AvatarColor; 8] = [
    AvatarColor::rgb(0xFF, 0x6B, 0x6B),
    AvatarColor::rgb(0x4E, 0xCD, 0xC4),
    AvatarColor::rgb(0x45, 0xB7, 0xD1),
    AvatarColor::rgb(0xFF, 0xBE, 0x0B),
    AvatarColor::rgb(0xFB, 0x56, 0x07),
    AvatarColor::rgb(0x83, 0x38, 0xEC),
    AvatarColor::rgb(0x3A, 0x86, 0xFF),
    AvatarColor::rgb(0xFF, 0x00, 0x6E),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactSection {
    pub title: String,
    pub contacts: Vec<Contact>,
}

/// Sorts by name, buckets by upper-cased first character and orders the
/// buckets by their key.
pub fn build_sections(contacts: &[Contact]) -> Vec<ContactSection> {
    let mut sorted: Vec<&Contact> = contacts.iter().collect();
    sorted.sort_by(|a, b| compare_names(&a.name, &b.name));

    let mut grouped: BTreeMap<String, Vec<Contact>> = BTreeMap::new();
    for contact in sorted {
        grouped
            .entry(section_key(&contact.name))
            .or_default()
            .push(contact.clone());
    }

    grouped
        .into_iter()
        .map(|(title, contacts)| ContactSection { title, contacts })
        .collect()
}

pub fn section_key(name: &str) -> String {
    name.chars()
        .next()
        .map(|first| first.to_uppercase().collect())
        .unwrap_or_default()
}

/// Locale-style name ordering: base letters first, then accents, then case
/// with lowercase ahead of uppercase.
pub fn compare_names(a: &str, b: &str) -> Ordering {
    base_letters(a)
        .cmp(&base_letters(b))
        .then_with(|| accented_letters(a).cmp(&accented_letters(b)))
        .then_with(|| case_weights(a).cmp(&case_weights(b)))
        .then_with(|| a.cmp(b))
}

fn base_letters(name: &str) -> String {
    name.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect()
}

fn accented_letters(name: &str) -> String {
    name.nfd().flat_map(char::to_lowercase).collect()
}

fn case_weights(name: &str) -> Vec<bool> {
    name.nfd()
        .filter(|c| !is_combining_mark(*c))
        .map(char::is_uppercase)
        .collect()
}

/// First letters of the first two space-separated name parts, upper-cased.
pub fn initials(name: &str) -> String {
    name.split(' ')
        .take(2)
        .filter_map(|part| part.chars().next())
        .flat_map(char::to_uppercase)
        .collect()
}

pub fn avatar_color(name: &str) -> AvatarColor {
    let index = name
        .encode_utf16()
        .next()
        .map_or(0, |unit| usize::from(unit) % AVATAR_PALETTE.len());
    AVATAR_PALETTE[index]
}

#[cfg(test)]
#[path = "tests/sections_tests.rs"]
mod tests;
