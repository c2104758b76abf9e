// Language catalogue
// Fixed mapping from editor selectors to Judge0 language ids and templates

use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Languages the editor can submit.
///
/// This is a closed set: the Judge0 ids below are the only ones the
/// backend is ever asked to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    JavaScript,
    Python,
    Java,
    C,
    Cpp,
}

impl Language {
    pub const ALL: [Language; 5] = [
        Language::JavaScript,
        Language::Python,
        Language::Java,
        Language::C,
        Language::Cpp,
    ];

    /// Numeric id understood by the execution backend
    pub fn judge0_id(&self) -> u32 {
        match self {
            Language::JavaScript => 63,
            Language::Python => 71,
            Language::Java => 62,
            Language::C => 48,
            Language::Cpp => 52,
        }
    }

    /// Canonical selector string
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::JavaScript => "javascript",
            Language::Python => "python",
            Language::Java => "java",
            Language::C => "c",
            Language::Cpp => "cpp",
        }
    }

    /// Hello-world program loaded into the playground editor
    pub fn starter_template(&self) -> &'static str {
        match self {
            Language::JavaScript => "console.log(\"Hello, World!\");",
            Language::Python => "print(\"Hello, World!\")",
            Language::Java => {
                "public class Main {\n    public static void main(String[] args) {\n        System.out.println(\"Hello, World!\");\n    }\n}"
            }
            Language::C => {
                "#include <stdio.h>\n\nint main() {\n    printf(\"Hello, World!\\n\");\n    return 0;\n}"
            }
            Language::Cpp => {
                "#include <iostream>\n\nint main() {\n    std::cout << \"Hello, World!\" << std::endl;\n    return 0;\n}"
            }
        }
    }

    /// Stub loaded into the practice editor after a problem is generated.
    ///
    /// JavaScript, Python and Java expose a `solve(input)` function that the
    /// harness calls; C and C++ are whole programs reading stdin.
    pub fn solution_template(&self) -> &'static str {
        match self {
            Language::JavaScript => "function solve(input) {\n  // Your code here\n  return input;\n}",
            Language::Python => "def solve(input):\n  # Your code here\n  return input",
            Language::Java => {
                "public class Solution {\n  public static Object solve(Object input) {\n    // Your code here\n    return input;\n  }\n}"
            }
            Language::C => {
                "#include <stdio.h>\n\nint main() {\n    // Read the input from stdin and print your answer\n    return 0;\n}"
            }
            Language::Cpp => {
                "#include <iostream>\n\nint main() {\n    // Read the input from std::cin and print your answer\n    return 0;\n}"
            }
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Language {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "javascript" | "js" => Ok(Language::JavaScript),
            "python" | "py" => Ok(Language::Python),
            "java" => Ok(Language::Java),
            "c" => Ok(Language::C),
            "cpp" | "c++" => Ok(Language::Cpp),
            _ => Err(Error::UnsupportedLanguage(s.to_string())),
        }
    }
}
