//! Découpage des listes en feuilles A4.

pub const BADGES_PER_SHEET: usize = 4;
pub const ATTENDANCE_ROWS_PER_SHEET: usize = 24;
pub const GRADE_ROWS_PER_SHEET: usize = 20;

/// Ligne d'une feuille : numéro affiché et élément, tous deux absents
/// pour les lignes de remplissage
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SheetRow<'a, T> {
    pub number: Option<usize>,
    pub item: Option<&'a T>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Sheet<'a, T> {
    pub index: usize,
    pub total: usize,
    pub rows: Vec<SheetRow<'a, T>>,
}

impl<T> Sheet<'_, T> {
    /// "Page 1/3"
    pub fn page_label(&self) -> String {
        format!("Page {}/{}", self.index + 1, self.total)
    }

    pub fn filled(&self) -> usize {
        self.rows.iter().filter(|r| r.item.is_some()).count()
    }
}

/// Feuilles de `per_sheet` lignes, numérotées en continu et complétées par
/// des lignes vides. Au moins `min_sheets` feuilles sont produites.
pub fn paginate<T>(items: &[T], per_sheet: usize, min_sheets: usize) -> Vec<Sheet<'_, T>> {
    let per_sheet = per_sheet.max(1);
    let total = items.len().div_ceil(per_sheet).max(min_sheets);

    (0..total)
        .map(|index| {
            let start = index * per_sheet;
            let rows = (0..per_sheet)
                .map(|i| match items.get(start + i) {
                    Some(item) => SheetRow {
                        number: Some(start + i + 1),
                        item: Some(item),
                    },
                    None => SheetRow {
                        number: None,
                        item: None,
                    },
                })
                .collect();
            Sheet { index, total, rows }
        })
        .collect()
}

/// Planches de badges : 4 emplacements, une planche vide au minimum
pub fn badge_sheets<T>(items: &[T]) -> Vec<Sheet<'_, T>> {
    paginate(items, BADGES_PER_SHEET, 1)
}

/// Feuilles de présence : aucune feuille sans étudiant
pub fn attendance_sheets<T>(items: &[T]) -> Vec<Sheet<'_, T>> {
    paginate(items, ATTENDANCE_ROWS_PER_SHEET, 0)
}

/// Fiches de notes : toujours au moins une fiche à remplir à la main
pub fn grade_sheets<T>(items: &[T]) -> Vec<Sheet<'_, T>> {
    paginate(items, GRADE_ROWS_PER_SHEET, 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_badge_pagination() {
        let none: Vec<u32> = vec![];
        let sheets = badge_sheets(&none);
        assert_eq!(sheets.len(), 1);
        assert_eq!(sheets[0].rows.len(), 4);
        assert_eq!(sheets[0].filled(), 0);

        for n in 1..=13u32 {
            let items: Vec<u32> = (0..n).collect();
            let sheets = badge_sheets(&items);
            assert_eq!(sheets.len(), (n as usize).div_ceil(4));
            assert!(sheets.iter().all(|s| s.rows.len() == 4));
        }
    }

    #[test]
    fn test_attendance_pagination_numbering() {
        let items: Vec<u32> = (0..50).collect();
        let sheets = attendance_sheets(&items);
        assert_eq!(sheets.len(), 3);
        assert_eq!(sheets[1].rows[0].number, Some(25));
        assert_eq!(sheets[2].filled(), 2);
        assert_eq!(sheets[2].rows[2].number, None);
        assert_eq!(sheets[2].page_label(), "Page 3/3");

        let none: Vec<u32> = vec![];
        assert!(attendance_sheets(&none).is_empty());
    }

    #[test]
    fn test_grade_sheet_padded_to_twenty() {
        let items: Vec<u32> = (0..3).collect();
        let sheets = grade_sheets(&items);
        assert_eq!(sheets.len(), 1);
        assert_eq!(sheets[0].rows.len(), 20);
        let numbers: Vec<Option<usize>> = sheets[0].rows.iter().take(4).map(|r| r.number).collect();
        assert_eq!(numbers, vec![Some(1), Some(2), Some(3), None]);
    }
}
