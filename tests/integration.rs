//! Integration tests for the tweet tokenizer

use tweet_tokenizer::{
    corpus::load_tweets, nlp::decode_entities, DictVectorizer, Documents, Error, MatrixReport,
    TokenCounts, TokenKind, TokenizerConfig, TweetTokenizer, Vectorizer, Vocabulary,
    CAPITALIZED_BRAND,
};

fn apple() -> TweetTokenizer {
    TweetTokenizer::new("Apple").unwrap()
}

mod tokenization {
    use super::*;

    #[test]
    fn test_empty_string_has_no_tokens() {
        assert!(apple().tokenize("").is_empty());
    }

    #[test]
    fn test_twitter_entities() {
        let tokens = apple().tokenize_tokens("@user #topic :) 555-1234");

        let found: Vec<_> = tokens
            .iter()
            .map(|t| (t.normalized.as_str(), t.kind))
            .collect();
        assert_eq!(
            found,
            vec![
                ("@user", TokenKind::Mention),
                ("#topic", TokenKind::Hashtag),
                (":)", TokenKind::Emoticon),
                ("555-1234", TokenKind::Phone),
            ]
        );
    }

    #[test]
    fn test_case_folding_spares_emoticons() {
        let tokenizer = apple().with_preserve_case(false);
        assert_eq!(
            tokenizer.tokenize("Happy :D HAPPY"),
            vec!["happy", ":D", "happy"]
        );
    }

    #[test]
    fn test_capitalized_brand_tag() {
        let tokenizer = apple();

        assert_eq!(
            tokenizer.tokenize("I love my Apple watch"),
            vec!["I", "love", "my", "Apple", "watch", CAPITALIZED_BRAND]
        );
        assert_eq!(
            tokenizer.tokenize("i love my apple watch"),
            vec!["i", "love", "my", "apple", "watch"]
        );
    }

    #[test]
    fn test_lowercase_mode_never_tags_brand() {
        let tokenizer = apple().with_preserve_case(false);
        assert_eq!(
            tokenizer.tokenize("I love my Apple watch"),
            vec!["i", "love", "my", "apple", "watch"]
        );
    }

    #[test]
    fn test_realistic_tweet() {
        let tokens = apple().tokenize(
            "RT @tim_cook: The new #iPhone is here&hellip; call 1-800-555-1234 :-) <b>Apple</b>",
        );
        assert_eq!(
            tokens,
            vec![
                "RT",
                "@tim_cook",
                ":",
                "The",
                "new",
                "#iPhone",
                "is",
                "here",
                "…",
                "call",
                "1-800-555-1234",
                ":-)",
                "<b>",
                "Apple",
                "</b>",
                CAPITALIZED_BRAND,
            ]
        );
    }

    #[test]
    fn test_emoticon_takes_priority_over_mention() {
        let tokens = apple().tokenize_tokens(":@ hello @friend");
        assert_eq!(tokens[0].normalized, ":@");
        assert_eq!(tokens[0].kind, TokenKind::Emoticon);
        assert_eq!(tokens[2].normalized, "@friend");
        assert_eq!(tokens[2].kind, TokenKind::Mention);
    }

    #[test]
    fn test_same_input_same_output() {
        let tokenizer = apple();
        let text = "Tom &amp; Jerry... 3/4 of us <3 #Apple-fans";
        assert_eq!(tokenizer.tokenize_tokens(text), tokenizer.tokenize_tokens(text));
    }

    #[test]
    fn test_tokenizer_from_config() {
        let config = TokenizerConfig {
            brand: "tesla".to_string(),
            preserve_case: true,
            strip_urls: true,
        };
        let tokenizer = TweetTokenizer::from_config(&config).unwrap();
        assert_eq!(tokenizer.brand(), "tesla");
        assert_eq!(
            tokenizer.tokenize("Tesla http://t.co/xyz"),
            vec!["Tesla", CAPITALIZED_BRAND]
        );
    }

    #[test]
    fn test_empty_brand_is_config_error() {
        assert!(matches!(TweetTokenizer::new(""), Err(Error::InvalidConfig(_))));
    }
}

mod entities {
    use super::*;

    #[test]
    fn test_entities_decoded() {
        let decoded = decode_entities("Tom &amp; Jerry &#65; &eacute;");
        assert!(decoded.contains(" and "));
        assert!(decoded.contains('A'));
        assert!(decoded.contains('é'));
        assert!(!decoded.contains('&'));
    }

    #[test]
    fn test_amp_without_other_named_entity_stays() {
        assert_eq!(decode_entities("AT&amp;T"), "AT&amp;T");
        assert_eq!(decode_entities("&#38;amp;"), "&amp;");
        assert_eq!(
            apple().tokenize("AT&amp;T"),
            vec!["AT", "&", "amp", ";", "T"]
        );
    }

    #[test]
    fn test_unresolvable_entities_stay() {
        assert_eq!(
            decode_entities("&#99999999; &notanentity;"),
            "&#99999999; &notanentity;"
        );
    }
}

mod vectorization {
    use super::*;

    const TWEETS: [&str; 3] = [
        "really enjoying how the apple's iPhone makes my iPad look small",
        "i like my apple, eating it makes me happy :)",
        "Apple shares up 3.5% today",
    ];

    #[test]
    fn test_fit_then_transform_is_stable() {
        let mut vectorizer = DictVectorizer::new(apple());
        let fitted = vectorizer.fit_transform(Documents::raw(&TWEETS));
        let transformed = vectorizer.transform(Documents::raw(&TWEETS));

        assert_eq!(fitted, transformed);
        assert_eq!(fitted.n_terms(), vectorizer.get_feature_names().len());
    }

    #[test]
    fn test_out_of_vocabulary_tokens_ignored() {
        let mut vectorizer = DictVectorizer::new(apple());
        let fitted = vectorizer.fit_transform(Documents::raw(&TWEETS));

        let dtm = vectorizer.transform(Documents::raw(&["zyzzyva apple"]));
        assert_eq!(dtm.n_terms(), fitted.n_terms());
        assert_eq!(dtm.row(0).unwrap().iter().sum::<usize>(), 1);
    }

    #[test]
    fn test_unfitted_transform_is_zero_width() {
        let vectorizer = DictVectorizer::new(apple());
        let dtm = vectorizer.transform(Documents::raw(&TWEETS));
        assert_eq!((dtm.n_documents(), dtm.n_terms()), (3, 0));
    }

    #[test]
    fn test_counts_per_document() {
        let vectorizer = DictVectorizer::new(apple());
        let counts = vectorizer.split_for_dict_vectorizer(Documents::raw(&["go go go Apple"]));

        let expected: TokenCounts = ["go", "go", "go", "Apple", CAPITALIZED_BRAND]
            .into_iter()
            .collect();
        assert_eq!(counts, vec![expected]);
    }

    #[test]
    fn test_independent_vectorizers_do_not_share_vocabulary() {
        let mut apple_vectorizer = DictVectorizer::new(apple());
        let mut tesla_vectorizer = DictVectorizer::new(TweetTokenizer::new("Tesla").unwrap());

        apple_vectorizer.fit_transform(Documents::raw(&["Apple pie"]));
        tesla_vectorizer.fit_transform(Documents::raw(&["Tesla car"]));

        assert_eq!(
            apple_vectorizer.get_feature_names(),
            ["Apple", "pie", CAPITALIZED_BRAND]
        );
        assert_eq!(
            tesla_vectorizer.get_feature_names(),
            ["Tesla", "car", CAPITALIZED_BRAND]
        );
    }

    #[test]
    fn test_vocabulary_reused_across_vectorizers() {
        let mut vectorizer = DictVectorizer::new(apple());
        let fitted = vectorizer.fit_transform(Documents::raw(&TWEETS));

        let json = serde_json::to_string(vectorizer.vocabulary()).unwrap();
        let vocabulary: Vocabulary = serde_json::from_str(&json).unwrap();

        let restored = DictVectorizer::with_vocabulary(apple(), vocabulary);
        assert_eq!(restored.transform(Documents::raw(&TWEETS)), fitted);
    }

    #[test]
    fn test_fit_on_one_file_transform_another() {
        let dir = tempfile::tempdir().unwrap();
        let train = dir.path().join("train.csv");
        let validation = dir.path().join("validation.csv");
        std::fs::write(
            &train,
            "tweet_id,tweet_text\n1,Apple stock up\n2,apple pie recipe\n",
        )
        .unwrap();
        std::fs::write(&validation, "tweet_id,tweet_text\n3,Apple pie\n").unwrap();

        let train = load_tweets(&train).unwrap();
        let validation = load_tweets(&validation).unwrap();

        let mut vectorizer = DictVectorizer::new(apple());
        let fitted = vectorizer.fit_transform(Documents::from(train.as_slice()));
        let transformed = vectorizer.transform(Documents::from(validation.as_slice()));

        assert_eq!(transformed.n_terms(), fitted.n_terms());
        let row = transformed.row(0).unwrap();
        let names = vectorizer.get_feature_names();
        let count = |term: &str| row[names.iter().position(|n| n == term).unwrap()];
        assert_eq!(count("Apple"), 1);
        assert_eq!(count("pie"), 1);
        assert_eq!(count(CAPITALIZED_BRAND), 1);
        assert_eq!(count("stock"), 0);

        let mut buf = Vec::new();
        MatrixReport::new(&fitted)
            .with_targets(vec![1, 0])
            .with_transformed(&transformed)
            .write_json(&mut buf)
            .unwrap();
        let report: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(report["targets"], serde_json::json!([1, 0]));
        assert_eq!(report["transformed"].as_array().unwrap().len(), 1);
    }
}
