/// Python source generators for property and large-scale tests.
use std::fmt::Write;

/// Generate `count` functions. Every third one is undocumented, the rest
/// carry a complete docstring.
#[allow(dead_code)]
pub fn generate_module(count: usize) -> String {
    let mut source = String::new();
    for i in 0..count {
        if i % 3 == 0 {
            writeln!(source, "def func_{i}(arg, limit=[]):").unwrap();
            writeln!(source, "    return arg\n").unwrap();
        } else {
            writeln!(source, "def func_{i}(arg: str, limit: int = {i}) -> str:").unwrap();
            writeln!(source, "    \"\"\"Process item {i}.").unwrap();
            writeln!(source).unwrap();
            writeln!(source, "    Args:").unwrap();
            writeln!(source, "        arg (str): the input").unwrap();
            writeln!(source, "        limit (int, optional): the cap; defaults to {i}").unwrap();
            writeln!(source).unwrap();
            writeln!(source, "    Returns:").unwrap();
            writeln!(source, "        str: the processed input").unwrap();
            writeln!(source, "    \"\"\"").unwrap();
            writeln!(source, "    return arg\n").unwrap();
        }
    }
    source
}
