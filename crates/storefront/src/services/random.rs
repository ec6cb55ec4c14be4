//! Random drink/snack suggestions.
//!
//! The picker draws uniformly from a fixed list, never repeating the item
//! currently shown, and keeps a short de-duplicated history.

use rand::Rng;
use rand::seq::IndexedRandom;
use rust_decimal::Decimal;

use sakaya_core::{Category, Price, SuggestionId};

use crate::models::Suggestion;

/// Maximum number of distinct suggestions kept in the history.
pub const HISTORY_LIMIT: usize = 5;

#[allow(clippy::too_many_arguments)]
fn suggestion(
    id: i64,
    name: &str,
    category: Category,
    price: i64,
    description: &str,
    alcohol_percent: Decimal,
    tags: [&str; 3],
    pairing: [&str; 3],
) -> Suggestion {
    Suggestion {
        id: SuggestionId::new(id),
        name: name.to_owned(),
        category,
        price: Price::yen(price),
        description: description.to_owned(),
        alcohol_percent,
        tags: tags.map(str::to_owned).to_vec(),
        pairing: pairing.map(str::to_owned).to_vec(),
    }
}

/// The eight items the random page chooses from.
#[must_use]
pub fn suggestion_catalog() -> Vec<Suggestion> {
    vec![
        suggestion(
            1,
            "純米大吟醸 山田錦",
            Category::Sake,
            3500,
            "山田錦を使用した上品な味わいの純米大吟醸酒。フルーティーな香りと繊細な味わいが特徴です。",
            Decimal::new(155, 1),
            ["日本酒", "純米大吟醸", "山田錦"],
            ["刺身", "天ぷら", "和食"],
        ),
        suggestion(
            2,
            "本格焼酎 黒霧島",
            Category::Shochu,
            1200,
            "さつまいもの甘みが感じられる本格焼酎。ロックでも水割りでも美味しくお楽しみいただけます。",
            Decimal::new(25, 0),
            ["焼酎", "さつまいも", "本格"],
            ["焼き鳥", "餃子", "鍋料理"],
        ),
        suggestion(
            3,
            "シャルドネ 白ワイン",
            Category::Wine,
            2800,
            "フルーティーで爽やかな白ワイン。魚料理やチーズとの相性が抜群です。",
            Decimal::new(12, 0),
            ["ワイン", "白ワイン", "シャルドネ"],
            ["魚料理", "チーズ", "サラダ"],
        ),
        suggestion(
            4,
            "クラフトビール IPA",
            Category::Beer,
            450,
            "ホップの苦味が効いたクラフトビール。爽快な飲み心地で暑い日にぴったりです。",
            Decimal::new(65, 1),
            ["ビール", "クラフト", "IPA"],
            ["ピザ", "ハンバーガー", "スパイシー料理"],
        ),
        suggestion(
            5,
            "赤ワイン カベルネ",
            Category::Wine,
            3200,
            "深いコクと豊かな香りの赤ワイン。肉料理との相性が抜群です。",
            Decimal::new(135, 1),
            ["ワイン", "赤ワイン", "カベルネ"],
            ["ステーキ", "チーズ", "肉料理"],
        ),
        suggestion(
            6,
            "麦焼酎 いいちこ",
            Category::Shochu,
            1000,
            "まろやかな口当たりの麦焼酎。すっきりとした味わいで飲みやすいです。",
            Decimal::new(25, 0),
            ["焼酎", "麦", "まろやか"],
            ["唐揚げ", "焼き魚", "居酒屋料理"],
        ),
        suggestion(
            7,
            "チーズ盛り合わせ",
            Category::Snack,
            1800,
            "3種類のチーズの盛り合わせ。ワインのお供に最適です。",
            Decimal::ZERO,
            ["おつまみ", "チーズ", "盛り合わせ"],
            ["ワイン", "日本酒", "ビール"],
        ),
        suggestion(
            8,
            "ナッツミックス",
            Category::Snack,
            680,
            "4種類のナッツをミックスした人気のおつまみ。どんなお酒にも合います。",
            Decimal::ZERO,
            ["おつまみ", "ナッツ", "ミックス"],
            ["ビール", "ウイスキー", "焼酎"],
        ),
    ]
}

/// Random suggestion state: the list, the item on display and the history.
#[derive(Debug, Clone)]
pub struct RandomPicker {
    catalog: Vec<Suggestion>,
    current: Option<Suggestion>,
    history: Vec<Suggestion>,
}

impl RandomPicker {
    #[must_use]
    pub const fn new(catalog: Vec<Suggestion>) -> Self {
        Self {
            catalog,
            current: None,
            history: Vec::new(),
        }
    }

    /// Rebuild state from persisted draws, newest first.
    ///
    /// The newest draw becomes the current item.
    #[must_use]
    pub fn resume<I>(catalog: Vec<Suggestion>, recent: I) -> Self
    where
        I: IntoIterator<Item = Suggestion>,
        I::IntoIter: DoubleEndedIterator,
    {
        let mut picker = Self::new(catalog);
        for drawn in recent.into_iter().rev() {
            picker.record(drawn);
        }
        picker
    }

    #[must_use]
    pub const fn current(&self) -> Option<&Suggestion> {
        self.current.as_ref()
    }

    /// Distinct recent picks, most recent first.
    #[must_use]
    pub fn history(&self) -> &[Suggestion] {
        &self.history
    }

    /// Pick a new item other than the current one.
    ///
    /// With a one-item list the same item is returned again. Returns `None`
    /// only for an empty list.
    pub fn draw<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<&Suggestion> {
        let current_id = self.current.as_ref().map(|s| s.id);
        let candidates: Vec<&Suggestion> = self
            .catalog
            .iter()
            .filter(|s| Some(s.id) != current_id)
            .collect();

        let picked = match candidates.choose(rng) {
            Some(picked) => (*picked).clone(),
            None => self.catalog.first()?.clone(),
        };
        self.record(picked);
        self.current.as_ref()
    }

    /// Show a history entry again. History is left as it is.
    pub fn revisit(&mut self, id: SuggestionId) -> Option<&Suggestion> {
        let entry = self.history.iter().find(|s| s.id == id)?.clone();
        self.current = Some(entry);
        self.current.as_ref()
    }

    fn record(&mut self, picked: Suggestion) {
        self.history.retain(|s| s.id != picked.id);
        self.history.insert(0, picked.clone());
        self.history.truncate(HISTORY_LIMIT);
        self.current = Some(picked);
    }
}

impl Default for RandomPicker {
    fn default() -> Self {
        Self::new(suggestion_catalog())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashSet;

    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    #[test]
    fn test_never_repeats_current() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut picker = RandomPicker::default();
        let mut previous = None;

        for _ in 0..200 {
            let id = picker.draw(&mut rng).unwrap().id;
            assert_ne!(Some(id), previous);
            previous = Some(id);
        }
    }

    #[test]
    fn test_history_is_bounded_and_distinct() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut picker = RandomPicker::default();

        for _ in 0..50 {
            let id = picker.draw(&mut rng).unwrap().id;
            let history = picker.history();
            assert!(history.len() <= HISTORY_LIMIT);
            assert_eq!(history.first().map(|s| s.id), Some(id));
            let distinct: HashSet<_> = history.iter().map(|s| s.id).collect();
            assert_eq!(distinct.len(), history.len());
        }
    }

    #[test]
    fn test_two_items_alternate() {
        let catalog: Vec<_> = suggestion_catalog().into_iter().take(2).collect();
        let mut rng = StdRng::seed_from_u64(1);
        let mut picker = RandomPicker::new(catalog);

        let first = picker.draw(&mut rng).unwrap().id;
        let second = picker.draw(&mut rng).unwrap().id;
        let third = picker.draw(&mut rng).unwrap().id;
        assert_ne!(first, second);
        assert_eq!(first, third);
        assert_eq!(picker.history().len(), 2);
    }

    #[test]
    fn test_single_and_empty_catalog() {
        let mut rng = StdRng::seed_from_u64(3);
        let single: Vec<_> = suggestion_catalog().into_iter().take(1).collect();
        let mut picker = RandomPicker::new(single);
        assert_eq!(picker.draw(&mut rng).unwrap().id, SuggestionId::new(1));
        assert_eq!(picker.draw(&mut rng).unwrap().id, SuggestionId::new(1));
        assert_eq!(picker.history().len(), 1);

        let mut empty = RandomPicker::new(Vec::new());
        assert!(empty.draw(&mut rng).is_none());
    }

    #[test]
    fn test_resume_and_revisit() {
        let catalog = suggestion_catalog();
        // Newest first, with a repeat of id 2.
        let recent: Vec<_> = [2_usize, 5, 2, 1]
            .iter()
            .map(|id| catalog[id - 1].clone())
            .collect();

        let mut picker = RandomPicker::resume(catalog, recent);

        assert_eq!(picker.current().map(|s| s.id), Some(SuggestionId::new(2)));
        let ids: Vec<_> = picker.history().iter().map(|s| s.id.as_i64()).collect();
        assert_eq!(ids, [2, 5, 1]);

        let shown = picker.revisit(SuggestionId::new(1)).unwrap().id;
        assert_eq!(shown, SuggestionId::new(1));
        let after: Vec<_> = picker.history().iter().map(|s| s.id.as_i64()).collect();
        assert_eq!(after, ids);
        assert!(picker.revisit(SuggestionId::new(8)).is_none());
    }
}
