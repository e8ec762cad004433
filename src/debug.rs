/// Returns a shorter version of [`std::any::type_name`]
///
/// `puzzle_search::algorithms::dfs::DfsSolver<puzzle_search::problems::maze_2d::Maze2DPuzzle>`
/// becomes `DfsSolver<Maze2DPuzzle>`.
// MIT from https://github.com/jakobhellermann/pretty-type-name/tree/main
pub fn type_name<T: ?Sized>() -> String {
    let name = std::any::type_name::<T>();
    type_name_str(name)
}

fn last_segment(path: &str) -> &str {
    path.rsplit(':').next().unwrap_or(path)
}

fn type_name_str(name: &str) -> String {
    if let Some(before) = name.strip_suffix("::{{closure}}") {
        return format!("{}::{{{{closure}}}}", type_name_str(before));
    }

    let mut short_name = String::new();

    // A typename may be a composition of several other type names (e.g. generic parameters)
    // separated by the characters that we try to find below.
    // Then, each individual typename is shortened to its last path component.
    let mut remainder = name;
    while let Some(index) = remainder.find(&['&', '<', '>', '(', ')', '[', ']', ',', ';'][..]) {
        let (path, new_remainder) = remainder.split_at(index);
        // Push the shortened path in front of the found character
        short_name.push_str(last_segment(path));

        let mut chars = new_remainder.chars();
        let Some(character) = chars.next() else {
            break;
        };
        short_name.push(character);
        remainder = chars.as_str();
        // A comma or semicolon is always followed by a space
        if character == ',' || character == ';' {
            short_name.push(' ');
            remainder = remainder.trim_start();
        }
    }

    // The remainder will only be non-empty if there were no matches at all
    if !remainder.is_empty() {
        // Then, the full typename is a path that has to be shortened
        short_name.push_str(last_segment(remainder));
    }

    short_name
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shortens_paths() {
        assert_eq!(type_name::<std::string::String>(), "String");
        assert_eq!(
            type_name::<crate::algorithms::dfs::DfsSolver<crate::problems::graph::GraphPuzzle>>(),
            "DfsSolver<GraphPuzzle>"
        );
        assert_eq!(
            type_name_str("std::collections::HashMap<u32, alloc::string::String>"),
            "HashMap<u32, String>"
        );
    }
}
