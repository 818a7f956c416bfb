use crate::{Assignment, Crossword, Vocabulary};

/// Character drawn for blocked cells.
pub const BLOCK: char = '█';

/// Lay out an assignment as rows of letters, with `None` for cells no assigned word covers.
pub fn letter_grid(
    crossword: &Crossword,
    vocabulary: &Vocabulary,
    assignment: &Assignment,
) -> Vec<Vec<Option<char>>> {
    let mut letters = vec![vec![None; crossword.width]; crossword.height];

    for (variable_id, word_id) in assignment.iter() {
        let variable = &crossword.variables[variable_id];
        let word = vocabulary.word(word_id);

        for ((row, col), &glyph) in variable.cells().zip(&word.glyphs) {
            letters[row][col] = Some(glyph);
        }
    }

    letters
}

/// Turn the given crossword and assignment into a rendered string, one line per row.
pub fn render_grid(crossword: &Crossword, vocabulary: &Vocabulary, assignment: &Assignment) -> String {
    let letters = letter_grid(crossword, vocabulary, assignment);

    (0..crossword.height)
        .map(|row| {
            (0..crossword.width)
                .map(|col| {
                    if crossword.structure[row][col] {
                        letters[row][col].unwrap_or(' ')
                    } else {
                        BLOCK
                    }
                })
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join("\n")
}
