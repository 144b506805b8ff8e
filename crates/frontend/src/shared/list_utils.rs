/// Универсальные утилиты для работы со списками (поиск, сортировка, обновление записей)
use contracts::domain::common::Record;
use leptos::prelude::*;
use std::cmp::Ordering;

/// Trait для типов данных, поддерживающих поиск
pub trait Searchable {
    /// Значения полей, по которым идёт поиск
    fn search_fields(&self) -> Vec<String>;

    /// Case-insensitive подстрока хотя бы в одном поле
    fn matches_filter(&self, filter: &str) -> bool {
        let needle = filter.to_lowercase();
        self.search_fields()
            .iter()
            .any(|field| field.to_lowercase().contains(&needle))
    }
}

/// Trait для типов данных, поддерживающих сортировку
pub trait Sortable {
    /// Сравнивает два объекта по указанному полю
    fn compare_by_field(&self, other: &Self, field: &str) -> Ordering;
}

/// Байтовые диапазоны совпадений `filter` в `text` (case-insensitive).
///
/// Сравнение идёт по символам после to_lowercase, а границы берутся из
/// исходной строки, поэтому срезы всегда попадают на границы символов.
/// Совпадение, которое режет символ пополам, пропускается.
pub fn match_ranges(text: &str, filter: &str) -> Vec<(usize, usize)> {
    let needle: Vec<char> = filter.to_lowercase().chars().collect();
    if needle.is_empty() {
        return Vec::new();
    }

    // (символ в нижнем регистре, начало и конец исходного символа)
    let lowered: Vec<(char, usize, usize)> = text
        .char_indices()
        .flat_map(|(start, ch)| {
            let end = start + ch.len_utf8();
            ch.to_lowercase().map(move |lc| (lc, start, end))
        })
        .collect();

    let starts_char = |i: usize| i == 0 || lowered[i - 1].1 != lowered[i].1;
    let ends_char = |i: usize| i == lowered.len() || lowered[i - 1].1 != lowered[i].1;

    let mut ranges = Vec::new();
    let mut i = 0;
    while i + needle.len() <= lowered.len() {
        let end = i + needle.len();
        let hit = lowered[i..end]
            .iter()
            .zip(&needle)
            .all(|((lc, _, _), n)| lc == n);
        if hit && starts_char(i) && ends_char(end) {
            ranges.push((lowered[i].1, lowered[end - 1].2));
            i = end;
        } else {
            i += 1;
        }
    }
    ranges
}

/// Подсветка совпадений в тексте (case-insensitive)
pub fn highlight_matches(text: &str, filter: &str) -> AnyView {
    let ranges = match_ranges(text, filter);
    if ranges.is_empty() {
        return view! { <span>{text.to_string()}</span> }.into_any();
    }

    let mut parts: Vec<AnyView> = Vec::new();
    let mut last_pos = 0;

    for (start, end) in ranges {
        if start > last_pos {
            parts.push(view! { <span>{text[last_pos..start].to_string()}</span> }.into_any());
        }
        parts.push(
            view! { <mark class="search-hit">{text[start..end].to_string()}</mark> }.into_any(),
        );
        last_pos = end;
    }

    if last_pos < text.len() {
        parts.push(view! { <span>{text[last_pos..].to_string()}</span> }.into_any());
    }

    view! { <>{parts}</> }.into_any()
}

/// Сортирует список по указанному полю
pub fn sort_list<T: Sortable>(items: &mut [T], field: &str, ascending: bool) {
    items.sort_by(|a, b| {
        let cmp = a.compare_by_field(b, field);
        if ascending {
            cmp
        } else {
            cmp.reverse()
        }
    });
}

/// Фильтрует список по поисковому запросу (каждое нажатие, без минимальной длины)
pub fn filter_list<T: Searchable + Clone>(items: &[T], filter: &str) -> Vec<T> {
    if filter.is_empty() {
        return items.to_vec();
    }

    items
        .iter()
        .filter(|item| item.matches_filter(filter))
        .cloned()
        .collect()
}

/// Заменяет запись с тем же id или добавляет в начало
pub fn upsert_record<T: Record>(items: &mut Vec<T>, record: T) {
    match items
        .iter()
        .position(|item| item.record_id() == record.record_id())
    {
        Some(pos) => items[pos] = record,
        None => items.insert(0, record),
    }
}

/// Удаляет запись по id
pub fn remove_record<T: Record>(items: &mut Vec<T>, id: i64) {
    items.retain(|item| item.record_id() != id);
}

/// Получить индикатор сортировки для заголовка
pub fn get_sort_indicator(current_field: &str, field: &str, ascending: bool) -> &'static str {
    if current_field == field {
        if ascending {
            " ▲"
        } else {
            " ▼"
        }
    } else {
        " ⇅"
    }
}

/// CSS класс заголовка сортируемой колонки
pub fn get_sort_class(current_field: &str, field: &str) -> &'static str {
    if current_field == field {
        "table__sortable-header table__sortable-header--active"
    } else {
        "table__sortable-header"
    }
}

/// Заголовок колонки с переключением сортировки
#[component]
pub fn SortHeader(
    label: &'static str,
    field: &'static str,
    #[prop(into)] sort_field: Signal<String>,
    #[prop(into)] ascending: Signal<bool>,
    #[prop(into)] on_sort: Callback<&'static str>,
) -> impl IntoView {
    view! {
        <div class="table__sortable-header" style="cursor:pointer;" on:click=move |_| on_sort.run(field)>
            {label}
            <span class=move || get_sort_class(&sort_field.get(), field)>
                {move || get_sort_indicator(&sort_field.get(), field, ascending.get())}
            </span>
        </div>
    }
}

/// Сравнение строк без учёта регистра
pub fn cmp_text(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase())
}

/// Сравнение f64 (NaN считается равным)
pub fn cmp_f64(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Row {
        id: i64,
        name: String,
        note: String,
    }

    impl Record for Row {
        fn record_id(&self) -> i64 {
            self.id
        }
    }

    impl Searchable for Row {
        fn search_fields(&self) -> Vec<String> {
            vec![self.name.clone(), self.note.clone()]
        }
    }

    impl Sortable for Row {
        fn compare_by_field(&self, other: &Self, field: &str) -> Ordering {
            match field {
                "name" => cmp_text(&self.name, &other.name),
                _ => self.id.cmp(&other.id),
            }
        }
    }

    fn row(id: i64, name: &str, note: &str) -> Row {
        Row {
            id,
            name: name.to_string(),
            note: note.to_string(),
        }
    }

    fn rows() -> Vec<Row> {
        vec![
            row(1, "Rice 25kg", "dry goods"),
            row(2, "Cooking oil", "Kitchen"),
            row(3, "Sugar", "dry goods"),
        ]
    }

    #[test]
    fn test_filter_is_case_insensitive_over_all_fields() {
        let found = filter_list(&rows(), "KITCHEN");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, 2);

        let found = filter_list(&rows(), "dry");
        assert_eq!(found.iter().map(|r| r.id).collect::<Vec<_>>(), vec![1, 3]);
    }

    #[test]
    fn test_single_character_filters() {
        let found = filter_list(&rows(), "s");
        assert_eq!(found.iter().map(|r| r.id).collect::<Vec<_>>(), vec![1, 3]);
        assert_eq!(filter_list(&rows(), "z").len(), 0);
    }

    #[test]
    fn test_match_ranges_ascii() {
        assert_eq!(match_ranges("Rice and rice", "RICE"), vec![(0, 4), (9, 13)]);
        assert!(match_ranges("Rice", "").is_empty());
        assert!(match_ranges("Rice", "oil").is_empty());
    }

    #[test]
    fn test_match_ranges_keep_char_boundaries() {
        // 'Ȿ' укорачивается при to_lowercase, 'İ' удлиняется
        assert!(match_ranges("Ȿİx", "i").is_empty());
        assert_eq!(match_ranges("Ȿİx", "X"), vec![(5, 6)]);
        assert_eq!(match_ranges("Ȿ rice", "RICE"), vec![(4, 8)]);
        for (start, end) in match_ranges("ȾȿȾ İstanbul ȿ", "ȿ") {
            assert!("ȾȿȾ İstanbul ȿ".is_char_boundary(start));
            assert!("ȾȿȾ İstanbul ȿ".is_char_boundary(end));
        }
        let _ = highlight_matches("Ȿİx", "i");
    }

    #[test]
    fn test_empty_filter_returns_all() {
        assert_eq!(filter_list(&rows(), ""), rows());
    }

    #[test]
    fn test_sort_list() {
        let mut items = rows();
        sort_list(&mut items, "name", true);
        assert_eq!(items[0].name, "Cooking oil");
        sort_list(&mut items, "name", false);
        assert_eq!(items[0].name, "Sugar");
    }

    #[test]
    fn test_upsert_and_remove() {
        let mut items = rows();
        upsert_record(&mut items, row(2, "Sunflower oil", "Kitchen"));
        assert_eq!(items.len(), 3);
        assert_eq!(items[1].name, "Sunflower oil");

        upsert_record(&mut items, row(9, "Salt", ""));
        assert_eq!(items[0].id, 9);

        remove_record(&mut items, 1);
        assert!(items.iter().all(|r| r.id != 1));
        remove_record(&mut items, 404);
        assert_eq!(items.len(), 3);
    }

    #[test]
    fn test_sort_indicator() {
        assert_eq!(get_sort_indicator("name", "name", true), " ▲");
        assert_eq!(get_sort_indicator("name", "name", false), " ▼");
        assert_eq!(get_sort_indicator("id", "name", true), " ⇅");
    }
}
