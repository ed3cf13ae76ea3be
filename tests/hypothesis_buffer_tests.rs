use ribble_stream::stream::HypothesisBuffer;
use ribble_stream::stream::TimestampedWord;

fn w(start: f64, end: f64, text: &str) -> TimestampedWord {
    TimestampedWord::new(start, end, text)
}

// A single iteration with no prior buffer commits nothing.
#[test]
fn single_iteration_with_no_prior_buffer_commits_nothing() {
    let mut hb = HypothesisBuffer::new();
    hb.insert(&[w(0.0, 0.4, "hello"), w(0.5, 0.9, " world")], 0.0);
    let committed = hb.flush();

    assert!(
        committed.is_empty(),
        "nothing should commit before a second overlapping proposal agrees"
    );
    let tail = hb.complete();
    assert_eq!(tail.len(), 2, "both proposed words sit in the incomplete tail");
}

// Agreement across two iterations commits the common prefix.
#[test]
fn second_overlapping_proposal_commits_the_common_prefix() {
    let mut hb = HypothesisBuffer::new();
    hb.insert(&[w(0.0, 0.4, "hello"), w(0.5, 0.9, " world")], 0.0);
    hb.flush();

    hb.insert(
        &[
            w(0.0, 0.4, "hello"),
            w(0.5, 0.9, " world"),
            w(1.1, 1.4, " today"),
        ],
        0.0,
    );
    let committed = hb.flush();

    assert_eq!(committed.len(), 2);
    assert_eq!(committed[0].text.as_ref(), "hello");
    assert_eq!(committed[1].text.as_ref(), " world");
    assert_eq!(hb.last_committed_time(), 0.9);
    assert_eq!(hb.last_committed_word(), Some(" world"));

    let tail = hb.complete();
    assert_eq!(tail.len(), 1);
    assert_eq!(tail[0].text.as_ref(), " today");
}

// N-gram dedup against previously committed text.
#[test]
fn ngram_dedup_against_committed_tail() {
    let mut hb = HypothesisBuffer::new();
    hb.insert(&[w(0.0, 1.0, "alpha"), w(1.0, 3.0, "beta")], 0.0);
    hb.flush();
    hb.insert(&[w(0.0, 1.0, "alpha"), w(1.0, 3.0, "beta")], 0.0);
    hb.flush();
    assert_eq!(hb.last_committed_time(), 3.0);

    hb.insert(
        &[
            w(2.95, 3.1, "alpha"),
            w(3.1, 3.3, "beta"),
            w(3.3, 3.6, "gamma"),
        ],
        0.0,
    );
    // "alpha beta" is a repeat of already-committed text and must be
    // dropped before the next flush sees it as a candidate.
    hb.flush();
    assert_eq!(hb.complete().len(), 1);
    assert_eq!(hb.complete()[0].text.as_ref(), "gamma");
}

// The n-gram dedup loop drops at most 5 consecutive leading words of
// `new`. Exercises the boundary: a full 5-word repeat of the committed
// tail is recognized and dropped in one pass.
#[test]
fn ngram_dedup_drops_up_to_the_five_word_cap() {
    let mut hb = HypothesisBuffer::new();
    // Commit a 5-word run "a".."e", ending at t=5.0.
    let committed_tail: Vec<TimestampedWord> = ["a", "b", "c", "d", "e"]
        .iter()
        .enumerate()
        .map(|(i, text)| w(i as f64, i as f64 + 1.0, text))
        .collect();
    hb.insert(&committed_tail, 0.0);
    hb.flush();
    hb.insert(&committed_tail, 0.0);
    hb.flush();
    assert_eq!(hb.last_committed_time(), 5.0);
    assert_eq!(hb.committed_len(), 5);

    // Propose the same 5 words again, immediately followed by one
    // genuinely new word.
    let mut next: Vec<TimestampedWord> = committed_tail
        .iter()
        .map(|word| w(word.start + 5.0, word.end + 5.0, word.text.as_ref()))
        .collect();
    next.push(w(10.0, 10.5, "f"));
    hb.insert(&next, 0.0);
    hb.flush();

    let tail = hb.complete();
    assert_eq!(tail.len(), 1, "the 5-word repeat should be dropped in full");
    assert_eq!(tail[0].text.as_ref(), "f");
}

// last_committed_time is non-decreasing across iterations.
#[test]
fn last_committed_time_is_non_decreasing() {
    let mut hb = HypothesisBuffer::new();
    let mut previous = hb.last_committed_time();

    hb.insert(&[w(0.0, 0.5, "a")], 0.0);
    hb.flush();
    assert!(hb.last_committed_time() >= previous);
    previous = hb.last_committed_time();

    hb.insert(&[w(0.0, 0.5, "a"), w(0.6, 1.0, "b")], 0.0);
    hb.flush();
    assert!(hb.last_committed_time() >= previous);
}

// pop_committed only ever removes words whose end <= the given time.
#[test]
fn pop_committed_respects_the_time_bound() {
    let mut hb = HypothesisBuffer::new();
    hb.insert(&[w(0.0, 1.0, "a"), w(1.0, 2.0, "b"), w(2.0, 3.0, "c")], 0.0);
    hb.flush();
    hb.insert(&[w(0.0, 1.0, "a"), w(1.0, 2.0, "b"), w(2.0, 3.0, "c")], 0.0);
    hb.flush();

    assert_eq!(hb.committed_len(), 3);
    hb.pop_committed(1.5);
    // Only "a" (end=1.0 <= 1.5) should have been evicted; "b" and "c" survive.
    assert_eq!(hb.committed_len(), 2);

    hb.pop_committed(1.5);
    assert_eq!(hb.committed_len(), 2, "re-popping at the same time is a no-op");
}

#[test]
fn empty_proposal_commits_nothing() {
    let mut hb = HypothesisBuffer::new();
    hb.insert(&[], 0.0);
    let committed = hb.flush();
    assert!(committed.is_empty());
}

#[test]
fn custom_tunables_change_the_commit_slack() {
    let mut hb = HypothesisBuffer::with_tunables(0.0, 1.0, 5);
    hb.insert(&[w(0.0, 0.5, "a")], 0.0);
    hb.flush();
    // With zero slack, a word starting exactly at last_committed_time is
    // filtered out by `start > last_committed_time - commit_slack`.
    hb.insert(&[w(0.5, 1.0, "b")], 0.0);
    hb.flush();
    assert!(
        hb.complete().is_empty(),
        "zero commit slack should reject a word starting exactly at last_committed_time"
    );
}
