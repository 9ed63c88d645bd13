#![allow(clippy::disallowed_types, reason = "proptest macros internally use Arc")]

use pretty_assertions::assert_eq;

use super::*;

fn classify(pool: &TypePool, ty: TypeIdx) -> Strategy {
    PropertyClassifier::new(pool).classify(ty)
}

#[test]
fn primitives_and_allowlist() {
    let pool = TypePool::new();

    assert_eq!(classify(&pool, TypeIdx::INT), Strategy::Primitive);
    assert_eq!(classify(&pool, TypeIdx::BOOLEAN), Strategy::Primitive);
    assert_eq!(classify(&pool, TypeIdx::STRING), Strategy::KnownImmutableValue);
    assert_eq!(classify(&pool, TypeIdx::INTEGER), Strategy::KnownImmutableValue);
    assert_eq!(classify(&pool, TypeIdx::BIG_DECIMAL), Strategy::KnownImmutableValue);
    assert_eq!(classify(&pool, TypeIdx::URI), Strategy::KnownImmutableValue);
    assert_eq!(classify(&pool, TypeIdx::COLOR), Strategy::KnownImmutableValue);
}

#[test]
fn containers() {
    let pool = TypePool::new();

    assert_eq!(classify(&pool, TypeIdx::LIST), Strategy::Collection);
    assert_eq!(classify(&pool, TypeIdx::SET), Strategy::Collection);
    assert_eq!(classify(&pool, TypeIdx::COLLECTION), Strategy::Collection);
    assert_eq!(classify(&pool, TypeIdx::MAP), Strategy::MapType);
    assert_eq!(classify(&pool, TypeIdx::ORDERED_MAP), Strategy::MapType);
    assert_eq!(classify(&pool, TypeIdx::DATE), Strategy::DateLike);
}

#[test]
fn arrays_win_over_everything() {
    let mut pool = TypePool::new();
    let strings = pool.array(TypeIdx::STRING);
    let unknown = pool.unresolved("T");
    let unknowns = pool.array(unknown);

    assert_eq!(classify(&pool, strings), Strategy::ArrayOrCloneable);
    assert_eq!(classify(&pool, unknowns), Strategy::ArrayOrCloneable);
}

#[test]
fn cloneable_wins_over_collection() {
    let mut pool = TypePool::new();
    let array_list = pool.class("ArrayList", &[TypeIdx::LIST, TypeIdx::CLONEABLE]);
    let plain_list = pool.class("LinkedList", &[TypeIdx::LIST]);

    assert_eq!(classify(&pool, array_list), Strategy::ArrayOrCloneable);
    assert_eq!(classify(&pool, plain_list), Strategy::Collection);
}

#[test]
fn date_subclass_is_date_like() {
    let mut pool = TypePool::new();
    let timestamp = pool.class("Timestamp", &[TypeIdx::DATE]);

    assert_eq!(classify(&pool, timestamp), Strategy::DateLike);
}

#[test]
fn enums_and_marked_classes() {
    let mut pool = TypePool::new();
    let color = pool.enumeration("Suit");
    let money = pool.immutable_class("Money");

    assert_eq!(classify(&pool, color), Strategy::Enum);
    assert_eq!(classify(&pool, money), Strategy::NestedImmutable);
}

#[test]
fn resolved_mutable_is_invalid() {
    let mut pool = TypePool::new();
    let wallet = pool.class("Wallet", &[]);

    assert_eq!(classify(&pool, wallet), Strategy::Invalid);
    assert_eq!(classify(&pool, TypeIdx::OBJECT), Strategy::Invalid);
}

#[test]
fn unresolved_is_deferred() {
    let mut pool = TypePool::new();
    let t = pool.unresolved("T");

    assert_eq!(classify(&pool, t), Strategy::Unresolved);
    assert_eq!(classify(&pool, TypeIdx::NONE), Strategy::Unresolved);
}

#[test]
fn value_like_strategies() {
    assert!(Strategy::Primitive.is_value_like());
    assert!(Strategy::NestedImmutable.is_value_like());
    assert!(!Strategy::Collection.is_value_like());
    assert!(!Strategy::Unresolved.is_value_like());
}

mod proptest_classify {
    use proptest::prelude::*;

    use super::super::PropertyClassifier;
    use frost_ir::{TypeIdx, TypePool};

    fn pool_with_extras() -> (TypePool, Vec<TypeIdx>) {
        let mut pool = TypePool::new();
        let mut extras = Vec::new();
        extras.push(pool.class("Wallet", &[]));
        extras.push(pool.immutable_class("Money"));
        extras.push(pool.enumeration("Suit"));
        extras.push(pool.unresolved("T"));
        extras.push(pool.class("ArrayList", &[TypeIdx::LIST, TypeIdx::CLONEABLE]));
        let ints = pool.array(TypeIdx::INT);
        extras.push(ints);
        (pool, extras)
    }

    proptest! {
        #[test]
        fn classification_is_idempotent(raw in 0u32..35) {
            let (pool, _) = pool_with_extras();
            let classifier = PropertyClassifier::new(&pool);
            let ty = TypeIdx::from_raw(raw);

            let first = classifier.classify(ty);
            let second = classifier.classify(ty);
            prop_assert_eq!(first, second);
        }

        #[test]
        fn fresh_pools_agree(pick in 0usize..6) {
            let (a, extras_a) = pool_with_extras();
            let (b, extras_b) = pool_with_extras();

            prop_assert_eq!(
                PropertyClassifier::new(&a).classify(extras_a[pick]),
                PropertyClassifier::new(&b).classify(extras_b[pick])
            );
        }
    }
}
