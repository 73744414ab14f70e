use std::mem;

use super::{Link, TreeMap};
use crate::util::error::MissingStringifier;
use crate::util::result::ResultExtension;

impl<K, V, C> TreeMap<K, V, C> {
    /// Renders the tree as a picture, one row per level, for visual debugging. Each node is
    /// written as its stringified entry followed by its color (`:R` or `:B`), with `/` and `\`
    /// arms leading down to its children.
    ///
    /// # Panics
    /// Panics if the TreeMap has no stringifier, see [`TreeMap::try_render`].
    pub fn render(&self) -> String {
        self.try_render().throw()
    }

    /// Renders the tree as a picture, returning an [`Err`] rather than panicking if the TreeMap
    /// has no stringifier.
    ///
    /// Every level is laid out as though the tree were complete: the node at index `i` of a row
    /// is centred in the `i`th of `2^row` equal-width slots, so missing nodes leave gaps rather
    /// than shifting their neighbours.
    pub fn try_render(&self) -> Result<String, MissingStringifier> {
        let fmt = self.fmt.ok_or(MissingStringifier)?;
        let mut out = format!("TreeMap - Size: {}\n", self.len);

        let height = self.height();
        if height == 0 {
            return Ok(out);
        }

        // Rows of the complete tree, with None standing in for missing nodes.
        let mut rows: Vec<Vec<Link<K, V>>> = Vec::with_capacity(height);
        let mut row = vec![self.root];
        for depth in 0..height {
            let next = if depth + 1 < height {
                row.iter()
                    .flat_map(|link| match link {
                        Some(node) => [node.left(), node.right()],
                        None => [None, None],
                    })
                    .collect()
            } else {
                Vec::new()
            };
            rows.push(mem::replace(&mut row, next));
        }

        let labels: Vec<Vec<Option<Vec<char>>>> = rows.iter()
            .map(|row| row.iter()
                .map(|link| link.map(|node| {
                    format!("{}:{}", fmt(node.key(), node.value()), node.color().tag())
                        .chars()
                        .collect()
                }))
                .collect())
            .collect();

        let cell = labels.iter()
            .flatten()
            .flatten()
            .map(Vec::len)
            .max()
            .unwrap_or(1);
        let width = (1_usize << (height - 1)) * (cell + 1);

        for (depth, row) in labels.iter().enumerate() {
            let span = width >> depth;
            let mut line = vec![' '; width];

            for (index, label) in row.iter().enumerate() {
                if let Some(label) = label {
                    let start = (index * span + span / 2).saturating_sub(label.len() / 2);
                    for (offset, c) in label.iter().enumerate() {
                        if let Some(slot) = line.get_mut(start + offset) {
                            *slot = *c;
                        }
                    }
                }
            }
            push_line(&mut out, &line);

            if depth + 1 == height {
                break;
            }

            // Arms sit halfway between each node and the centre of its child's slot.
            let mut arms = vec![' '; width];
            let child_span = span / 2;
            for (index, link) in rows[depth].iter().enumerate() {
                let Some(node) = link else { continue };
                let centre = index * span + span / 2;

                if node.left().is_some() {
                    let child_centre = 2 * index * child_span + child_span / 2;
                    arms[(centre + child_centre) / 2] = '/';
                }
                if node.right().is_some() {
                    let child_centre = (2 * index + 1) * child_span + child_span / 2;
                    arms[(centre + child_centre) / 2] = '\\';
                }
            }
            push_line(&mut out, &arms);
        }

        Ok(out)
    }

    /// Prints the tree to standard output, see [`TreeMap::render`].
    ///
    /// # Panics
    /// Panics if the TreeMap has no stringifier.
    pub fn print(&self) {
        print!("{}", self.render());
    }
}

fn push_line(out: &mut String, line: &[char]) {
    out.extend(line.iter());
    let trimmed = out.trim_end_matches(' ').len();
    out.truncate(trimmed);
    out.push('\n');
}
