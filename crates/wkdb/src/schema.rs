// Kept in sync with `sql/schema.sql`.

diesel::table! {
    kanji (id) {
        id -> Integer,
        character -> Text,
        meaning -> Text,
        level -> Integer,
    }
}

diesel::table! {
    kanji_mnemonics (id) {
        id -> Integer,
        kanji_id -> Integer,
        mnemonic_type -> Text,
        content -> Text,
    }
}

diesel::table! {
    kanji_radicals (kanji_id, radical_id) {
        kanji_id -> Integer,
        radical_id -> Integer,
    }
}

diesel::table! {
    kanji_readings (id) {
        id -> Integer,
        kanji_id -> Integer,
        reading_type -> Text,
        reading_text -> Text,
    }
}

diesel::table! {
    radicals (id) {
        id -> Integer,
        character -> Nullable<Text>,
        character_image -> Nullable<Text>,
        meaning -> Text,
        mnemonic -> Text,
        mnemonic_image -> Nullable<Text>,
        level -> Integer,
    }
}

diesel::table! {
    vocab_alternative_meanings (id) {
        id -> Integer,
        vocab_id -> Integer,
        meaning_text -> Text,
    }
}

diesel::table! {
    vocab_explanations (id) {
        id -> Integer,
        vocab_id -> Integer,
        explanation_type -> Text,
        content -> Text,
    }
}

diesel::table! {
    vocab_kanji_composition (vocab_id, kanji_id) {
        vocab_id -> Integer,
        kanji_id -> Integer,
    }
}

diesel::table! {
    vocabulary (id) {
        id -> Integer,
        character -> Text,
        primary_meaning -> Text,
        reading -> Text,
        level -> Integer,
    }
}

diesel::joinable!(kanji_mnemonics -> kanji (kanji_id));
diesel::joinable!(kanji_radicals -> kanji (kanji_id));
diesel::joinable!(kanji_radicals -> radicals (radical_id));
diesel::joinable!(kanji_readings -> kanji (kanji_id));
diesel::joinable!(vocab_alternative_meanings -> vocabulary (vocab_id));
diesel::joinable!(vocab_explanations -> vocabulary (vocab_id));
diesel::joinable!(vocab_kanji_composition -> kanji (kanji_id));
diesel::joinable!(vocab_kanji_composition -> vocabulary (vocab_id));

diesel::allow_tables_to_appear_in_same_query!(
    kanji,
    kanji_mnemonics,
    kanji_radicals,
    kanji_readings,
    radicals,
    vocab_alternative_meanings,
    vocab_explanations,
    vocab_kanji_composition,
    vocabulary,
);
