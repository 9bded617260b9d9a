use clap::{ArgAction, Parser};

/// Usage text printed for `/?` and for an unsupported number of arguments
pub const USAGE: &str = "
在目录中以正则表达式搜索文件并批量替换为新文件

使用方法：

    1. 无参数交互运行：
    fsr

    2. 在当前目录中搜索：
    fsr [FileNameRegexp]

    3. 在指定目录中搜索：
    fsr [Directory] [FileNameRegexp]

    4. 在指定目录中搜索并替换为指定文件：
    fsr [Directory] [FileNameRegexp] [ReplacementFile]

参数说明：

    [Directory]        ： 搜索目录，支持相对路径，省略时为当前目录
    [FileNameRegexp]   ： 被搜索的文件名正则表达式
    [ReplacementFile]  ： 替换后的文件，支持相对路径

任何一步输入 exit 即可取消。
";

/// Argument that asks for the usage text
pub const HELP_ARG: &str = "/?";

/// Directory searched when only a pattern is given
pub const CURRENT_DIR: &str = "./";

/// Command line arguments parser
#[derive(Parser, Debug)]
#[command(author, version, about = "Search files by name regexp and replace them with one file")]
#[command(name = "fsr", after_long_help = USAGE)]
pub struct Args {
    /// [Directory] [FileNameRegexp] [ReplacementFile]
    ///
    /// Taken verbatim once the first value is seen, so patterns such as
    /// `-old\.conf$` are values rather than flags.
    #[arg(value_name = "ARGS", allow_hyphen_values = true, trailing_var_arg = true)]
    pub values: Vec<String>,

    /// Print diagnostics to stderr, repeat for more detail
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    pub verbose: u8,
}

/// What the command line asks the program to do
#[derive(Debug, PartialEq)]
pub enum Invocation {
    /// Print `USAGE` and stop
    Help,

    /// Replace files, asking for whatever is missing
    Run(Request),
}

/// Values taken from the command line, none validated yet
#[derive(Debug, Default, PartialEq)]
pub struct Request {
    pub directory: Option<String>,
    pub pattern: Option<String>,
    pub replacement: Option<String>,
}

impl Args {
    /// Map the positional arguments to an invocation by their count
    pub fn invocation(&self) -> Invocation {
        match self.values.as_slice() {
            [] => Invocation::Run(Request::default()),
            [only] if only == HELP_ARG => Invocation::Help,
            [pattern] => Invocation::Run(Request {
                directory: Some(CURRENT_DIR.to_string()),
                pattern: Some(pattern.clone()),
                replacement: None,
            }),
            [directory, pattern] => Invocation::Run(Request {
                directory: Some(directory.clone()),
                pattern: Some(pattern.clone()),
                replacement: None,
            }),
            [directory, pattern, replacement] => Invocation::Run(Request {
                directory: Some(directory.clone()),
                pattern: Some(pattern.clone()),
                replacement: Some(replacement.clone()),
            }),
            _ => Invocation::Help,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn invocation(argv: &[&str]) -> Invocation {
        let mut full = vec!["fsr"];
        full.extend_from_slice(argv);
        Args::try_parse_from(full).unwrap().invocation()
    }

    #[test]
    fn test_no_arguments_prompts_for_everything() {
        assert_eq!(invocation(&[]), Invocation::Run(Request::default()));
    }

    #[test]
    fn test_single_argument_is_pattern() {
        assert_eq!(
            invocation(&[r"\.conf$"]),
            Invocation::Run(Request {
                directory: Some("./".to_string()),
                pattern: Some(r"\.conf$".to_string()),
                replacement: None,
            })
        );
    }

    #[test]
    fn test_help_argument() {
        assert_eq!(invocation(&["/?"]), Invocation::Help);
    }

    #[test]
    fn test_directory_and_pattern() {
        assert_eq!(
            invocation(&["/srv", "^a"]),
            Invocation::Run(Request {
                directory: Some("/srv".to_string()),
                pattern: Some("^a".to_string()),
                replacement: None,
            })
        );
    }

    #[test]
    fn test_all_three_values() {
        assert_eq!(
            invocation(&["/srv", "^a", "new.conf"]),
            Invocation::Run(Request {
                directory: Some("/srv".to_string()),
                pattern: Some("^a".to_string()),
                replacement: Some("new.conf".to_string()),
            })
        );
    }

    #[test]
    fn test_too_many_arguments_shows_help() {
        assert_eq!(invocation(&["a", "b", "c", "d"]), Invocation::Help);
    }

    #[test]
    fn test_help_marker_only_alone() {
        // With other values it is just a directory name
        assert!(matches!(invocation(&["/?", "x"]), Invocation::Run(_)));
    }

    #[test]
    fn test_hyphen_leading_pattern_alone() {
        assert_eq!(
            invocation(&[r"-old\.conf$"]),
            Invocation::Run(Request {
                directory: Some("./".to_string()),
                pattern: Some(r"-old\.conf$".to_string()),
                replacement: None,
            })
        );
    }

    #[test]
    fn test_hyphen_leading_pattern_after_directory() {
        assert_eq!(
            invocation(&["/srv", r"-old\.conf$"]),
            Invocation::Run(Request {
                directory: Some("/srv".to_string()),
                pattern: Some(r"-old\.conf$".to_string()),
                replacement: None,
            })
        );
    }

    #[test]
    fn test_flag_like_value_after_directory_is_a_pattern() {
        let args = Args::try_parse_from(["fsr", "/srv", "-v"]).unwrap();
        assert_eq!(args.verbose, 0);
        assert_eq!(
            args.invocation(),
            Invocation::Run(Request {
                directory: Some("/srv".to_string()),
                pattern: Some("-v".to_string()),
                replacement: None,
            })
        );

        let args = Args::try_parse_from(["fsr", "/srv", "-x", "-new.conf"]).unwrap();
        assert_eq!(
            args.invocation(),
            Invocation::Run(Request {
                directory: Some("/srv".to_string()),
                pattern: Some("-x".to_string()),
                replacement: Some("-new.conf".to_string()),
            })
        );
    }

    #[test]
    fn test_verbose_count() {
        let args = Args::try_parse_from(["fsr", "-vv", "x"]).unwrap();
        assert_eq!(args.verbose, 2);
        assert_eq!(args.values, vec!["x".to_string()]);
    }
}
