use headsup_holdem::cards::{Card, Rank, Suit};
use headsup_holdem::deck::Deck;
use headsup_holdem::evaluator::{evaluate, evaluate_five, evaluate_seven, Category, EvalError};
use proptest::prelude::*;
use std::cmp::Ordering;

/// `n` distinct cards drawn from a full deck, in random order.
fn distinct_cards(n: usize) -> impl Strategy<Value = Vec<Card>> {
    prop::sample::subsequence(Deck::new().as_slice().to_vec(), n).prop_shuffle()
}

fn five(cards: &[Card]) -> [Card; 5] {
    [cards[0], cards[1], cards[2], cards[3], cards[4]]
}

fn rank_from_val(v: u8) -> Rank {
    Rank::from_value(v).unwrap_or(Rank::Ace)
}

fn straight_cards(top: u8) -> [Card; 5] {
    let ranks = if top == 5 {
        [Rank::Ace, Rank::Two, Rank::Three, Rank::Four, Rank::Five]
    } else {
        [
            rank_from_val(top - 4),
            rank_from_val(top - 3),
            rank_from_val(top - 2),
            rank_from_val(top - 1),
            rank_from_val(top),
        ]
    };
    let suits = [Suit::Club, Suit::Diamond, Suit::Heart, Suit::Spade, Suit::Club];
    [
        Card::new(ranks[0], suits[0]),
        Card::new(ranks[1], suits[1]),
        Card::new(ranks[2], suits[2]),
        Card::new(ranks[3], suits[3]),
        Card::new(ranks[4], suits[4]),
    ]
}

fn ranks_desc(ranks: &[Rank]) -> Vec<Rank> {
    let mut out = ranks.to_vec();
    out.sort_by(|a, b| b.cmp(a));
    out
}

fn flush_rank_set() -> impl Strategy<Value = Vec<Rank>> {
    prop::collection::btree_set(2u8..=14u8, 5)
        .prop_filter("non-straight ranks", |set| {
            let vals: Vec<u8> = set.iter().copied().collect();
            let is_wheel = vals == vec![2, 3, 4, 5, 14];
            let is_straight = vals.windows(2).all(|w| w[1] == w[0] + 1);
            !(is_straight || is_wheel)
        })
        .prop_map(|set| set.into_iter().map(rank_from_val).collect())
}

proptest! {
    #[test]
    fn ordering_matches_category_then_key(a in distinct_cards(5), b in distinct_cards(5)) {
        let ea = evaluate_five(&five(&a));
        let eb = evaluate_five(&five(&b));
        let expected = ea.category.cmp(&eb.category).then_with(|| ea.key.cmp(&eb.key));
        prop_assert_eq!(ea.cmp(&eb), expected);
        prop_assert_eq!(ea.value().cmp(&eb.value()), expected);
    }

    #[test]
    fn five_card_ordering_is_antisymmetric_and_transitive(a in distinct_cards(5), b in distinct_cards(5), c in distinct_cards(5)) {
        let ea = evaluate_five(&five(&a));
        let eb = evaluate_five(&five(&b));
        let ec = evaluate_five(&five(&c));

        if ea >= eb && eb >= ea { prop_assert_eq!(ea.cmp(&eb), Ordering::Equal); }
        if ea >= eb && eb >= ec { prop_assert!(ea >= ec); }
    }

    #[test]
    fn seven_card_best_is_at_least_as_good_as_any_five(cards in distinct_cards(7)) {
        let arr = [cards[0], cards[1], cards[2], cards[3], cards[4], cards[5], cards[6]];
        let best7 = evaluate_seven(&arr);
        let mut matched = false;
        for i in 0..3 { for j in (i+1)..4 { for k in (j+1)..5 { for l in (k+1)..6 { for m in (l+1)..7 {
            let e5 = evaluate_five(&[arr[i], arr[j], arr[k], arr[l], arr[m]]);
            prop_assert!(best7 >= e5);
            matched |= best7 == e5;
        }}}}}
        prop_assert!(matched, "best hand must come from some five-card subset");
        prop_assert_eq!(best7.best_cards.len(), 5);
        prop_assert!(best7.best_cards.iter().all(|c| arr.contains(c)));
    }

    #[test]
    fn evaluation_ignores_input_order(cards in distinct_cards(7), k in 0usize..7) {
        let mut reordered = cards.clone();
        reordered.rotate_left(k);
        reordered.reverse();
        prop_assert_eq!(evaluate(&cards).unwrap(), evaluate(&reordered).unwrap());
    }

    #[test]
    fn short_hands_only_make_rank_groups(cards in (2usize..=4).prop_flat_map(distinct_cards)) {
        let eval = evaluate(&cards).unwrap();
        prop_assert!(matches!(
            eval.category,
            Category::HighCard | Category::OnePair | Category::TwoPair | Category::ThreeOfAKind | Category::FourOfAKind
        ));
        prop_assert_eq!(eval.best_cards.len(), cards.len());
    }

    #[test]
    fn straight_ordering_respects_top_card(top_hi in 6u8..=14u8, top_lo in 5u8..=13u8) {
        prop_assume!(top_hi > top_lo);
        let e_hi = evaluate_five(&straight_cards(top_hi));
        let e_lo = evaluate_five(&straight_cards(top_lo));
        prop_assert_eq!(e_hi.category, Category::Straight);
        prop_assert_eq!(e_lo.category, Category::Straight);
        prop_assert!(e_hi > e_lo);
    }

    #[test]
    fn wheel_is_lowest_straight(top in 6u8..=14u8) {
        let e_wheel = evaluate_five(&straight_cards(5));
        let e_high = evaluate_five(&straight_cards(top));
        prop_assert_eq!(e_wheel.category, Category::Straight);
        prop_assert_eq!(e_wheel.key.clone(), vec![Rank::Five]);
        prop_assert!(e_high > e_wheel);
    }

    #[test]
    fn flush_kicker_ordering(a in flush_rank_set(), b in flush_rank_set()) {
        let hand_a = a.iter().map(|&r| Card::new(r, Suit::Heart)).collect::<Vec<_>>();
        let hand_b = b.iter().map(|&r| Card::new(r, Suit::Heart)).collect::<Vec<_>>();
        let e_a = evaluate_five(&five(&hand_a));
        let e_b = evaluate_five(&five(&hand_b));
        prop_assert_eq!(e_a.category, Category::Flush);
        prop_assert_eq!(e_b.category, Category::Flush);

        match ranks_desc(&a).cmp(&ranks_desc(&b)) {
            Ordering::Greater => prop_assert!(e_a > e_b),
            Ordering::Less => prop_assert!(e_a < e_b),
            Ordering::Equal => prop_assert_eq!(e_a.cmp(&e_b), Ordering::Equal),
        }
    }

    #[test]
    fn out_of_range_counts_are_rejected(cards in prop_oneof![distinct_cards(0), distinct_cards(1), distinct_cards(8)]) {
        prop_assert_eq!(evaluate(&cards).unwrap_err(), EvalError::CardCount(cards.len()));
    }
}
