//! Minimal unified line diff for mismatch reports: `---`/`+++` labels,
//! `@@` hunk headers, three lines of context.

const CONTEXT: usize = 3;

#[derive(Clone, Copy, PartialEq)]
enum Tag {
    Equal,
    Delete,
    Insert,
}

#[derive(Clone, Copy)]
struct Op {
    tag: Tag,
    a0: usize,
    a1: usize,
    b0: usize,
    b1: usize,
}

pub fn unified_diff(a: &str, b: &str, from_label: &str, to_label: &str) -> String {
    let a_lines = split_keepends(a);
    let b_lines = split_keepends(b);
    let ops = opcodes(&a_lines, &b_lines);
    if ops.iter().all(|op| op.tag == Tag::Equal) {
        return String::new();
    }

    let mut out = String::new();
    out.push_str(&format!("--- {}\n+++ {}\n", from_label, to_label));
    for group in grouped(&ops) {
        let first = group[0];
        let last = group[group.len() - 1];
        out.push_str(&format!(
            "@@ -{} +{} @@\n",
            format_range(first.a0, last.a1),
            format_range(first.b0, last.b1)
        ));
        for op in group {
            match op.tag {
                Tag::Equal => push_lines(&mut out, ' ', &a_lines[op.a0..op.a1]),
                Tag::Delete => push_lines(&mut out, '-', &a_lines[op.a0..op.a1]),
                Tag::Insert => push_lines(&mut out, '+', &b_lines[op.b0..op.b1]),
            }
        }
    }
    out
}

fn push_lines(out: &mut String, marker: char, lines: &[&str]) {
    for line in lines {
        out.push(marker);
        out.push_str(line);
        if !line.ends_with('\n') {
            out.push('\n');
        }
    }
}

fn format_range(start: usize, stop: usize) -> String {
    let length = stop - start;
    if length == 1 {
        return format!("{}", start + 1);
    }
    let beginning = if length == 0 { start } else { start + 1 };
    format!("{},{}", beginning, length)
}

fn split_keepends(text: &str) -> Vec<&str> {
    let mut lines = Vec::new();
    let mut rest = text;
    while let Some(pos) = rest.find('\n') {
        lines.push(&rest[..=pos]);
        rest = &rest[pos + 1..];
    }
    if !rest.is_empty() {
        lines.push(rest);
    }
    lines
}

/// Line-level opcodes: equal runs from an LCS over the middle of the two
/// sequences, after peeling the common prefix and suffix.
fn opcodes(a: &[&str], b: &[&str]) -> Vec<Op> {
    let prefix = a
        .iter()
        .zip(b.iter())
        .take_while(|(x, y)| x == y)
        .count();
    let max_suffix = a.len().min(b.len()) - prefix;
    let suffix = a[prefix..]
        .iter()
        .rev()
        .zip(b[prefix..].iter().rev())
        .take(max_suffix)
        .take_while(|(x, y)| x == y)
        .count();

    let mut matches: Vec<(usize, usize)> = (0..prefix).map(|i| (i, i)).collect();
    for (i, j) in lcs_matches(
        &a[prefix..a.len() - suffix],
        &b[prefix..b.len() - suffix],
    ) {
        matches.push((prefix + i, prefix + j));
    }
    for k in 0..suffix {
        matches.push((a.len() - suffix + k, b.len() - suffix + k));
    }

    let mut ops = Vec::new();
    let (mut ai, mut bi) = (0usize, 0usize);
    let push_gap = |ops: &mut Vec<Op>, ai: usize, bi: usize, a1: usize, b1: usize| {
        if a1 > ai {
            ops.push(Op {
                tag: Tag::Delete,
                a0: ai,
                a1,
                b0: bi,
                b1: bi,
            });
        }
        if b1 > bi {
            ops.push(Op {
                tag: Tag::Insert,
                a0: a1,
                a1,
                b0: bi,
                b1,
            });
        }
    };
    let mut m = 0usize;
    while m < matches.len() {
        let (ma, mb) = matches[m];
        push_gap(&mut ops, ai, bi, ma, mb);
        // extend the equal run
        let mut end = m + 1;
        while end < matches.len()
            && matches[end].0 == matches[end - 1].0 + 1
            && matches[end].1 == matches[end - 1].1 + 1
        {
            end += 1;
        }
        let (ea, eb) = matches[end - 1];
        ops.push(Op {
            tag: Tag::Equal,
            a0: ma,
            a1: ea + 1,
            b0: mb,
            b1: eb + 1,
        });
        ai = ea + 1;
        bi = eb + 1;
        m = end;
    }
    push_gap(&mut ops, ai, bi, a.len(), b.len());
    ops
}

fn lcs_matches(a: &[&str], b: &[&str]) -> Vec<(usize, usize)> {
    let (n, m) = (a.len(), b.len());
    if n == 0 || m == 0 {
        return Vec::new();
    }
    // cap the DP table; past this the whole middle renders as a rewrite
    if (n + 1) * (m + 1) > 4_000_000 {
        return Vec::new();
    }
    let mut table = vec![0u32; (n + 1) * (m + 1)];
    for i in (0..n).rev() {
        for j in (0..m).rev() {
            table[i * (m + 1) + j] = if a[i] == b[j] {
                table[(i + 1) * (m + 1) + j + 1] + 1
            } else {
                table[(i + 1) * (m + 1) + j].max(table[i * (m + 1) + j + 1])
            };
        }
    }
    let mut out = Vec::new();
    let (mut i, mut j) = (0usize, 0usize);
    while i < n && j < m {
        if a[i] == b[j] {
            out.push((i, j));
            i += 1;
            j += 1;
        } else if table[(i + 1) * (m + 1) + j] >= table[i * (m + 1) + j + 1] {
            i += 1;
        } else {
            j += 1;
        }
    }
    out
}

/// Split opcodes into hunks separated by more than `2 * CONTEXT` equal
/// lines, trimming leading/trailing context to `CONTEXT` lines.
fn grouped(ops: &[Op]) -> Vec<Vec<Op>> {
    let mut trimmed: Vec<Op> = ops.to_vec();
    if let Some(first) = trimmed.first_mut() {
        if first.tag == Tag::Equal {
            first.a0 = first.a0.max(first.a1.saturating_sub(CONTEXT));
            first.b0 = first.b0.max(first.b1.saturating_sub(CONTEXT));
        }
    }
    if let Some(last) = trimmed.last_mut() {
        if last.tag == Tag::Equal {
            last.a1 = last.a1.min(last.a0 + CONTEXT);
            last.b1 = last.b1.min(last.b0 + CONTEXT);
        }
    }

    let mut groups = Vec::new();
    let mut group: Vec<Op> = Vec::new();
    for (idx, op) in trimmed.iter().enumerate() {
        let is_edge = idx == 0 || idx == trimmed.len() - 1;
        if op.tag == Tag::Equal && !is_edge && op.a1 - op.a0 > 2 * CONTEXT {
            group.push(Op {
                a1: op.a0 + CONTEXT,
                b1: op.b0 + CONTEXT,
                ..*op
            });
            groups.push(group);
            group = vec![Op {
                a0: op.a1 - CONTEXT,
                b0: op.b1 - CONTEXT,
                ..*op
            }];
        } else {
            group.push(*op);
        }
    }
    if group.iter().any(|op| op.tag != Tag::Equal) {
        groups.push(group);
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::unified_diff;

    #[test]
    fn equal_inputs_produce_no_output() {
        assert_eq!(unified_diff("a\nb\n", "a\nb\n", "left", "right"), "");
    }

    #[test]
    fn single_line_change_shows_both_sides_with_labels() {
        let diff = unified_diff(
            "foo();\n// comment\nbar();\n",
            "foo();\n// different comment\nbar();\n",
            "left/reduce.c",
            "right/reduce.c",
        );
        assert!(diff.starts_with("--- left/reduce.c\n+++ right/reduce.c\n"));
        assert!(diff.contains("@@ -1,3 +1,3 @@\n"));
        assert!(diff.contains("-// comment\n"));
        assert!(diff.contains("+// different comment\n"));
        assert!(diff.contains(" foo();\n"));
    }

    #[test]
    fn distant_changes_split_into_separate_hunks() {
        let a: String = (0..20).map(|i| format!("line{}\n", i)).collect();
        let b = a.replace("line2\n", "LINE2\n").replace("line17\n", "LINE17\n");
        let diff = unified_diff(&a, &b, "a", "b");
        assert_eq!(diff.matches("@@").count(), 4, "two hunk headers:\n{}", diff);
        assert!(diff.contains("-line2\n+LINE2\n"));
        assert!(diff.contains("-line17\n+LINE17\n"));
    }

    #[test]
    fn missing_trailing_newline_still_renders_a_line() {
        let diff = unified_diff("a\nend", "a\nEND", "a", "b");
        assert!(diff.contains("-end\n"));
        assert!(diff.contains("+END\n"));
    }

    #[test]
    fn pure_insertion_uses_zero_length_range() {
        let diff = unified_diff("a\nb\n", "a\nx\nb\n", "a", "b");
        assert!(diff.contains("+x\n"));
        assert!(diff.contains("@@ -1,2 +1,3 @@\n"), "got:\n{}", diff);
    }
}
