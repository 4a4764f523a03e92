use lexrag_core::traits::ChunkRanker;
use lexrag_core::{chunk_text, Chunk, SourceKind};
use lexrag_text::{retrieve_top_k_by_keyword, retrieve_top_k_by_keyword_scored, score_chunks_by_keyword, KeywordRanker};

fn chunks(texts: &[&str]) -> Vec<Chunk> {
    texts.iter().copied().map(Chunk::new).collect()
}

fn positions(result: &[&Chunk], input: &[Chunk]) -> Vec<usize> {
    result
        .iter()
        .map(|r| input.iter().position(|c| std::ptr::eq(c, *r)).expect("result chunk comes from the input"))
        .collect()
}

#[test]
fn matching_chunk_ranks_before_zero_scores() {
    let input = chunks(&["the cat sat on the mat", "dogs and cats are friends", "quantum mechanics is hard"]);
    let result = retrieve_top_k_by_keyword("cats", &input, 2);
    assert_eq!(positions(&result, &input), vec![1, 0]);

    let scored = retrieve_top_k_by_keyword_scored("cats", &input, 2);
    let expected = (1.0 / 5.0) * (4.0f64 / 1.0).ln();
    assert!((scored[0].score - expected).abs() < 1e-12);
    assert_eq!(scored[0].index, 1);
    assert_eq!(scored[1].score, 0.0);
    assert!(scored.iter().all(|h| h.source == SourceKind::Keyword));
}

#[test]
fn termless_query_falls_back_to_input_order() {
    let input = chunks(&["one", "two", "three", "four"]);
    for query in ["!!!", "", "a an of", "   "] {
        let result = retrieve_top_k_by_keyword(query, &input, 3);
        assert_eq!(positions(&result, &input), vec![0, 1, 2], "query {query:?}");
    }
    assert!(score_chunks_by_keyword("!!!", &input).is_none());
}

#[test]
fn empty_inputs_and_zero_k_yield_nothing() {
    let input = chunks(&["alpha beta gamma"]);
    assert!(retrieve_top_k_by_keyword("alpha", &input, 0).is_empty());
    assert!(retrieve_top_k_by_keyword("!!!", &input, 0).is_empty());
    assert!(retrieve_top_k_by_keyword("alpha", &[], 5).is_empty());
}

#[test]
fn result_length_is_min_of_k_and_chunks() {
    let input = chunks(&["alpha", "beta", "gamma"]);
    assert_eq!(retrieve_top_k_by_keyword("zzz nothing matches", &input, 10).len(), 3);
    assert_eq!(retrieve_top_k_by_keyword("alpha", &input, 2).len(), 2);
}

#[test]
fn shorter_chunk_wins_on_term_frequency() {
    let input = chunks(&["rust appears once among many other plain words here", "rust guide"]);
    let result = retrieve_top_k_by_keyword("Rust", &input, 2);
    assert_eq!(positions(&result, &input), vec![1, 0]);
}

#[test]
fn rarer_term_outweighs_common_term() {
    let input = chunks(&[
        "common words common words",
        "common words with zebra",
        "common words again here",
    ]);
    let result = retrieve_top_k_by_keyword("common zebra", &input, 1);
    assert_eq!(positions(&result, &input), vec![1]);
}

#[test]
fn zero_score_ties_keep_input_order() {
    let input = chunks(&["red", "green", "blue", "yellow", "violet cats"]);
    let result = retrieve_top_k_by_keyword("cats", &input, 5);
    assert_eq!(positions(&result, &input), vec![4, 0, 1, 2, 3]);
}

#[test]
fn repeated_query_term_counts_twice() {
    let input = chunks(&["the cat sat on the mat", "dogs and cats are friends", "quantum mechanics is hard"]);
    let scores = score_chunks_by_keyword("cats CATS", &input).unwrap();
    // df counts the term once per occurrence: 2, so idf = ln(4 / 2)
    let expected = 2.0 * (1.0 / 5.0) * (4.0f64 / 2.0).ln();
    assert!((scores[1] - expected).abs() < 1e-12);
    assert_eq!(scores[0], 0.0);
    assert_eq!(scores[2], 0.0);
}

#[test]
fn punctuation_is_ignored_when_matching() {
    let input = chunks(&["Nothing here.", "Photosynthesis: light -> sugar!"]);
    let result = retrieve_top_k_by_keyword("what is PHOTOSYNTHESIS?", &input, 1);
    assert_eq!(positions(&result, &input), vec![1]);
}

#[test]
fn retrieval_is_deterministic() {
    let text: String = (0..600).map(|i| format!("term{} shared ", i % 37)).collect();
    let input: Vec<Chunk> = chunk_text(&text, 50, 10).into_iter().map(Chunk::new).collect();
    let first = positions(&retrieve_top_k_by_keyword("term5 term12 shared", &input, 5), &input);
    let second = positions(&retrieve_top_k_by_keyword("term5 term12 shared", &input, 5), &input);
    assert_eq!(first, second);
    assert_eq!(first.len(), 5);
}

#[test]
fn keyword_ranker_matches_free_function() {
    let input = chunks(&["apples and pears", "pears only", "nothing"]);
    let ranked = KeywordRanker.rank("pears", &input, 2).unwrap();
    let direct = retrieve_top_k_by_keyword("pears", &input, 2);
    assert_eq!(ranked.len(), direct.len());
    for (hit, chunk) in ranked.iter().zip(direct) {
        assert!(std::ptr::eq(hit.chunk, chunk));
    }
}
