//! Synthetic poster texts.

pub const SENTENCE: &str = "这是一个用来测试分页效果的句子。";

const MARKED_SENTENCE: &str = "**重点**内容和==高亮==说明((旁注))放在一起。";

/// Paragraphs of varying length with inline markers and blank separators.
pub fn marked_essay(paragraphs: usize) -> String {
    (0..paragraphs)
        .map(|i| {
            if i % 3 == 0 {
                MARKED_SENTENCE.repeat(i % 9 + 1)
            } else {
                SENTENCE.repeat(i % 13 + 1)
            }
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// One paragraph of `sentences` sentences.
pub fn single_block(sentences: usize) -> String {
    SENTENCE.repeat(sentences)
}
