// Solution harness
// Turns a `solve(input)` solution plus the example input into a runnable submission

use crate::error::{Error, Result};
use crate::language::Language;
use crate::request;
use crate::types::JobRequest;

/// How a language's solution is wired to the example input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HarnessStrategy {
    /// Append a statement printing `solve(<input>)` after the user code
    AppendCall,
    /// Wrap the user's `Solution` class with a `Main` entry point.
    ///
    /// The code must declare `class Solution` and no other public class;
    /// anything else is rejected before submission.
    JavaMain,
    /// Run the code as a full program with the input on stdin
    Stdin,
}

impl HarnessStrategy {
    pub fn for_language(language: Language) -> Self {
        match language {
            Language::JavaScript | Language::Python => HarnessStrategy::AppendCall,
            Language::Java => HarnessStrategy::JavaMain,
            Language::C | Language::Cpp => HarnessStrategy::Stdin,
        }
    }
}

/// Compose the submission for a practice run
pub fn compose(code: &str, language: Language, input: &str) -> Result<JobRequest> {
    let request = match HarnessStrategy::for_language(language) {
        HarnessStrategy::AppendCall => {
            let call = match language {
                Language::JavaScript => format!("console.log(JSON.stringify(solve({})));", input),
                _ => format!("print(solve({}))", input),
            };
            request::build_for(&format!("{}\n{}", code, call), language, "")
        }
        HarnessStrategy::JavaMain => request::build_for(&compose_java(code, input)?, language, ""),
        HarnessStrategy::Stdin => request::build_for(code, language, input),
    };
    Ok(request)
}

// Judge0 compiles Main.java, so Main must be the only public top-level class
fn compose_java(code: &str, input: &str) -> Result<String> {
    if !declares_class(code, "Solution") {
        return Err(Error::Harness(
            "Java solutions must define a class named Solution".to_string(),
        ));
    }

    let solution = code.replacen("public class Solution", "class Solution", 1);
    if solution.contains("public class ") {
        return Err(Error::Harness(
            "Java solutions must not declare a public class other than Solution".to_string(),
        ));
    }

    Ok(format!(
        "{}\n\npublic class Main {{\n    public static void main(String[] args) {{\n        System.out.println(Solution.solve({}));\n    }}\n}}",
        solution, input
    ))
}

fn declares_class(code: &str, name: &str) -> bool {
    let needle = format!("class {}", name);
    code.match_indices(&needle).any(|(at, _)| {
        code[at + needle.len()..]
            .chars()
            .next()
            .map_or(true, |c| !(c.is_alphanumeric() || c == '_'))
    })
}
