use crate::types::Item;

const SAMPLE: [(&str, &str, &str); 10] = [
    ("Naruto", "Masashi Kishimoto", "Action"),
    ("One Piece", "Eiichiro Oda", "Action"),
    ("Dragon Ball", "Akira Toriyama", "Action"),
    ("Attack on Titan", "Hajime Isayama", "Action"),
    ("Berserk", "Kentaro Miura", "Fantasy"),
    ("Death Note", "Tsugumi Ohba", "Mystery"),
    ("Hunter x Hunter", "Yoshihiro Togashi", "Action"),
    ("Bleach", "Tite Kubo", "Action"),
    ("Fullmetal Alchemist", "Hiromu Arakawa", "Fantasy"),
    ("Tokyo Ghoul", "Sui Ishida", "Horror"),
];

/// Built-in sample catalog, ids assigned from 1 in listing order.
#[must_use]
pub fn sample_items() -> Vec<Item> {
    (1u64..)
        .zip(SAMPLE)
        .map(|(id, (title, author, genre))| Item::new(id, title, author, genre))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ItemId;

    #[test]
    fn test_sample_ids_are_sequential() {
        let items = sample_items();
        assert_eq!(items.len(), 10);
        assert_eq!(items[0].id, ItemId(1));
        assert_eq!(items[9].id, ItemId(10));
        assert_eq!(items[9].title, "Tokyo Ghoul");
    }
}
