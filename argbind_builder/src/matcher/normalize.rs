use thiserror::Error;

use crate::constant::*;
use crate::matcher::model::*;
use crate::model::Normalized;

#[cfg(feature = "tracing_debug")]
use tracing::debug;

/// Failure to rewrite the raw tokens into flag/value pairs.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum NormalizeError {
    /// A character inside a short option cluster is not a declared short option.
    #[error("Malformed option '{cluster}': short option '-{short}' does not exist.")]
    MalformedCluster {
        /// The full token holding the cluster.
        cluster: String,
        /// The offending character.
        short: char,
        /// The index of the token in the input.
        offset: usize,
    },

    /// A cluster without any option characters (ex: `-=value`).
    #[error("Malformed option '{cluster}': no short option specified.")]
    EmptyCluster {
        /// The full token.
        cluster: String,
        /// The index of the token in the input.
        offset: usize,
    },

    /// A value-taking option is the final token.
    #[error("Option '{flag}' requires a value.")]
    MissingValue {
        /// The option's flag.
        flag: String,
        /// The index of the token in the input.
        offset: usize,
    },
}

/// Rewrites raw tokens so each option is a single flag token immediately followed by exactly one value token.
///
/// Rules:
/// * Tokens not starting with `-` (and the lone `-`) pass through unchanged.
/// * `--` passes through, as does every token after it.
/// * `-x=v` and `--name=v` split on the first `=`; a boolean `v` in any accepted form (ex: `0`, `T`) becomes `false`/`true`.
/// * A boolean flag without a value gets the implicit value `true`, unless the next token is literally `true` or `false`.
/// * A value-taking flag without an inline value takes the next token verbatim (even if it starts with `-`).
/// * `-xyz` is scanned left to right: boolean options expand to `-x true`, the first value-taking option takes the remainder of the token as its value.
pub(crate) struct Normalizer<'a> {
    options: &'a OptionIndex,
}

impl<'a> Normalizer<'a> {
    pub(crate) fn new(options: &'a OptionIndex) -> Self {
        Self { options }
    }

    pub(crate) fn normalize(&self, tokens: &[&str]) -> Result<Normalized, NormalizeError> {
        let mut out: Vec<String> = Vec::with_capacity(tokens.len());
        let mut offset = 0;
        let mut options_ended = false;

        while offset < tokens.len() {
            let token = tokens[offset];
            offset += 1;

            if options_ended || token == STDIN || !token.starts_with(PREFIX) {
                out.push(token.to_string());
            } else if token == END_OF_OPTIONS {
                options_ended = true;
                out.push(token.to_string());
            } else if token.starts_with(LONG_PREFIX) {
                offset = self.expand_long(token, tokens, offset, &mut out)?;
            } else {
                offset = self.expand_short(token, tokens, offset, &mut out)?;
            }
        }

        Ok(Normalized {
            tokens: out,
            consumed: offset,
        })
    }

    /// Expand a `--name` token, returning the offset of the next unread token.
    fn expand_long(
        &self,
        token: &str,
        tokens: &[&str],
        offset: usize,
        out: &mut Vec<String>,
    ) -> Result<usize, NormalizeError> {
        if let Some((flag, value)) = token.split_once(VALUE_DELIMITER) {
            if let Some((_, option_config)) = self.options.by_flag(flag) {
                out.push(flag.to_string());
                out.push(inline_value(option_config.is_boolean(), value));
            } else {
                out.push(token.to_string());
            }

            return Ok(offset);
        }

        match self.options.by_flag(token) {
            Some((_, option_config)) => {
                out.push(token.to_string());
                self.take_value(token, option_config.is_boolean(), tokens, offset, out)
            }
            None => {
                // Unknown long options are left for the matcher to report as leftover.
                #[cfg(feature = "tracing_debug")]
                {
                    debug!("Passing through undeclared option '{token}'.");
                }

                out.push(token.to_string());
                Ok(offset)
            }
        }
    }

    /// Expand a `-xyz` cluster, returning the offset of the next unread token.
    fn expand_short(
        &self,
        token: &str,
        tokens: &[&str],
        offset: usize,
        out: &mut Vec<String>,
    ) -> Result<usize, NormalizeError> {
        let cluster = &token[PREFIX.len_utf8()..];
        let (cluster, inline) = match cluster.split_once(VALUE_DELIMITER) {
            Some((c, v)) => (c, Some(v)),
            None => (cluster, None),
        };

        if cluster.is_empty() {
            return Err(NormalizeError::EmptyCluster {
                cluster: token.to_string(),
                offset: offset - 1,
            });
        }

        #[cfg(feature = "tracing_debug")]
        {
            debug!("Expanding short option cluster '{token}'.");
        }

        for (index, single) in cluster.char_indices() {
            let option_config = match self.options.by_short(single) {
                Some((_, option_config)) => option_config,
                None => {
                    return Err(NormalizeError::MalformedCluster {
                        cluster: token.to_string(),
                        short: single,
                        offset: offset - 1,
                    });
                }
            };
            let flag = format!("{PREFIX}{single}");
            let remainder = &cluster[index + single.len_utf8()..];
            out.push(flag.clone());

            if remainder.is_empty() {
                // The final character is the only one that may use the '=' value or the next token.
                return match inline {
                    Some(value) => {
                        out.push(inline_value(option_config.is_boolean(), value));
                        Ok(offset)
                    }
                    None => self.take_value(&flag, option_config.is_boolean(), tokens, offset, out),
                };
            }

            if option_config.is_boolean() {
                out.push(IMPLICIT_TRUE.to_string());
            } else {
                // A value-taking option swallows the rest of the token, ending the cluster.
                let value = match inline {
                    Some(value) => format!("{remainder}{VALUE_DELIMITER}{value}"),
                    None => remainder.to_string(),
                };
                out.push(value);
                return Ok(offset);
            }
        }

        unreachable!("internal error - a non-empty cluster must end at its final character")
    }

    /// Produce the value for a flag which had no inline value.
    fn take_value(
        &self,
        flag: &str,
        boolean: bool,
        tokens: &[&str],
        offset: usize,
        out: &mut Vec<String>,
    ) -> Result<usize, NormalizeError> {
        if boolean {
            match tokens.get(offset) {
                Some(next) if *next == IMPLICIT_TRUE || *next == IMPLICIT_FALSE => {
                    out.push(next.to_string());
                    Ok(offset + 1)
                }
                _ => {
                    out.push(IMPLICIT_TRUE.to_string());
                    Ok(offset)
                }
            }
        } else {
            match tokens.get(offset) {
                Some(next) => {
                    out.push(next.to_string());
                    Ok(offset + 1)
                }
                None => Err(NormalizeError::MissingValue {
                    flag: flag.to_string(),
                    offset: offset - 1,
                }),
            }
        }
    }
}

/// The value token for an `=` joined value.
/// Boolean forms are canonicalized, so the output never depends on the `true`/`false` lookahead of a bare flag.
fn inline_value(boolean: bool, value: &str) -> String {
    match canonical_bool(value) {
        Some(canonical) if boolean => canonical.to_string(),
        _ => value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{seq::SliceRandom, thread_rng, Rng};
    use rstest::rstest;

    fn index(options: Vec<(Vec<&str>, bool)>) -> OptionIndex {
        let mut index = OptionIndex::default();

        for (flags, boolean) in options.into_iter() {
            index
                .insert(OptionConfig::new(
                    flags.iter().map(|f| f.to_string()).collect(),
                    boolean,
                ))
                .unwrap();
        }

        index
    }

    fn normalize(index: &OptionIndex, tokens: &[&str]) -> Result<Vec<String>, NormalizeError> {
        Normalizer::new(index)
            .normalize(tokens)
            .map(|normalized| normalized.tokens)
    }

    #[rstest]
    #[case(vec![], vec![])]
    #[case(vec!["ab"], vec!["ab"])]
    #[case(vec!["-a"], vec!["-a", "true"])]
    #[case(vec!["-a=false"], vec!["-a", "false"])]
    #[case(vec!["-ab"], vec!["-a", "true", "-b", "true"])]
    #[case(vec!["-abc", "hello"], vec!["-a", "true", "-b", "true", "-c", "hello"])]
    #[case(vec!["-shello"], vec!["-s", "hello"])]
    #[case(vec!["-ac", "test"], vec!["-a", "true", "-c", "test"])]
    #[case(vec!["-s", "-5"], vec!["-s", "-5"])]
    #[case(vec!["-s=", "x"], vec!["-s", "", "x"])]
    #[case(vec!["-s=a=b"], vec!["-s", "a=b"])]
    #[case(vec!["-ab=false"], vec!["-a", "true", "-b", "false"])]
    #[case(vec!["-a=0"], vec!["-a", "false"])]
    #[case(vec!["-a=T", "1"], vec!["-a", "true", "1"])]
    #[case(vec!["-ab=F"], vec!["-a", "true", "-b", "false"])]
    #[case(vec!["-a=maybe"], vec!["-a", "maybe"])]
    #[case(vec!["-s=0"], vec!["-s", "0"])]
    #[case(vec!["-a", "0"], vec!["-a", "true", "0"])]
    #[case(vec!["-a", "true"], vec!["-a", "true"])]
    #[case(vec!["-a", "false", "x"], vec!["-a", "false", "x"])]
    #[case(vec!["-a", "x"], vec!["-a", "true", "x"])]
    #[case(vec!["x", "-a", "y"], vec!["x", "-a", "true", "y"])]
    #[case(vec!["-"], vec!["-"])]
    fn normalize_short(#[case] tokens: Vec<&str>, #[case] expected: Vec<&str>) {
        let index = index(vec![
            (vec!["-a"], true),
            (vec!["-b"], true),
            (vec!["-c"], false),
            (vec!["-s"], false),
        ]);

        assert_eq!(normalize(&index, &tokens).unwrap(), expected);
    }

    #[rstest]
    #[case(vec!["--verbose"], vec!["--verbose", "true"])]
    #[case(vec!["--verbose=false"], vec!["--verbose", "false"])]
    #[case(vec!["--verbose=1"], vec!["--verbose", "true"])]
    #[case(vec!["--name=1"], vec!["--name", "1"])]
    #[case(vec!["--name", "x"], vec!["--name", "x"])]
    #[case(vec!["--name", "--verbose"], vec!["--name", "--verbose"])]
    #[case(vec!["--name=x=y"], vec!["--name", "x=y"])]
    #[case(vec!["--name="], vec!["--name", ""])]
    #[case(vec!["--other", "x"], vec!["--other", "x"])]
    #[case(vec!["--other=x"], vec!["--other=x"])]
    #[case(vec!["-n", "x", "--verbose"], vec!["-n", "x", "--verbose", "true"])]
    fn normalize_long(#[case] tokens: Vec<&str>, #[case] expected: Vec<&str>) {
        let index = index(vec![(vec!["-v", "--verbose"], true), (vec!["-n", "--name"], false)]);

        assert_eq!(normalize(&index, &tokens).unwrap(), expected);
    }

    #[rstest]
    #[case(vec!["--", "-a", "--x"], vec!["--", "-a", "--x"])]
    #[case(vec!["-a", "--", "-a"], vec!["-a", "true", "--", "-a"])]
    #[case(vec!["-s", "--", "-a"], vec!["-s", "--", "-a", "true"])]
    fn normalize_end_of_options(#[case] tokens: Vec<&str>, #[case] expected: Vec<&str>) {
        let index = index(vec![(vec!["-a"], true), (vec!["-s"], false)]);

        assert_eq!(normalize(&index, &tokens).unwrap(), expected);
    }

    #[test]
    fn normalize_value_halts_cluster() {
        // The value-taking option swallows the rest of the cluster, even characters naming boolean options.
        let index = index(vec![(vec!["-a"], true), (vec!["-b"], true), (vec!["-s"], false)]);

        assert_eq!(normalize(&index, &["-sab"]).unwrap(), vec!["-s", "ab"]);
        assert_eq!(normalize(&index, &["-asb=x"]).unwrap(), vec!["-a", "true", "-s", "b=x"]);
    }

    #[rstest]
    #[case(vec!["-x"], "-x", 'x', 0)]
    #[case(vec!["-ax"], "-ax", 'x', 0)]
    #[case(vec!["-a", "-bxa"], "-bxa", 'x', 1)]
    #[case(vec!["-xs=1"], "-xs=1", 'x', 0)]
    fn normalize_malformed(
        #[case] tokens: Vec<&str>,
        #[case] cluster: &str,
        #[case] short: char,
        #[case] offset: usize,
    ) {
        let index = index(vec![(vec!["-a"], true), (vec!["-b"], true), (vec!["-s"], false)]);

        assert_eq!(
            normalize(&index, &tokens).unwrap_err(),
            NormalizeError::MalformedCluster {
                cluster: cluster.to_string(),
                short,
                offset,
            }
        );
    }

    #[test]
    fn normalize_empty_cluster() {
        let index = index(vec![(vec!["-a"], true)]);

        assert_matches!(
            normalize(&index, &["x", "-=1"]),
            Err(NormalizeError::EmptyCluster { offset: 1, .. })
        );
    }

    #[rstest]
    #[case(vec!["-s"], "-s", 0)]
    #[case(vec!["-as"], "-s", 0)]
    #[case(vec!["x", "--name"], "--name", 1)]
    fn normalize_missing_value(
        #[case] tokens: Vec<&str>,
        #[case] flag: &str,
        #[case] offset: usize,
    ) {
        let index = index(vec![(vec!["-a"], true), (vec!["-s", "--name"], false)]);

        assert_eq!(
            normalize(&index, &tokens).unwrap_err(),
            NormalizeError::MissingValue {
                flag: flag.to_string(),
                offset,
            }
        );
    }

    #[test]
    fn normalize_consumed() {
        let index = index(vec![(vec!["-a"], true), (vec!["-s"], false)]);
        let normalized = Normalizer::new(&index)
            .normalize(&["-as", "v", "x", "-a", "false"])
            .unwrap();

        assert_eq!(normalized.consumed, 5);
        assert_eq!(
            normalized.tokens,
            vec!["-a", "true", "-s", "v", "x", "-a", "false"]
        );
    }

    #[rstest]
    #[case(vec!["-abc", "hello", "x"])]
    #[case(vec!["-a=false", "--", "-b"])]
    #[case(vec!["-s", "-a", "-ab", "y"])]
    #[case(vec!["--name=x", "--verbose", "-"])]
    #[case(vec!["-cfoo", "-b", "false"])]
    #[case(vec!["-a=0", "1"])]
    #[case(vec!["--verbose=F", "-b=TRUE", "x"])]
    #[case(vec!["-ab=f", "0"])]
    fn normalize_idempotent(#[case] tokens: Vec<&str>) {
        let index = index(vec![
            (vec!["-a"], true),
            (vec!["-b"], true),
            (vec!["-c"], false),
            (vec!["-s", "--name"], false),
            (vec!["--verbose"], true),
        ]);

        let once = normalize(&index, &tokens).unwrap();
        let once_refs: Vec<&str> = once.iter().map(String::as_str).collect();
        let twice = normalize(&index, &once_refs).unwrap();
        assert_eq!(twice, once);
    }

    #[test]
    fn normalize_idempotent_random() {
        let booleans = ['a', 'b', 'c', 'd'];
        let valued = ['s', 't'];
        let index = index(vec![
            (vec!["-a"], true),
            (vec!["-b"], true),
            (vec!["-c"], true),
            (vec!["-d"], true),
            (vec!["-s"], false),
            (vec!["-t"], false),
        ]);
        let mut rng = thread_rng();

        for _ in 0..200 {
            let mut tokens: Vec<String> = Vec::default();

            for _ in 0..rng.gen_range(0..6) {
                match rng.gen_range(0..5) {
                    0 => tokens.push(format!("pos{}", rng.gen::<u8>())),
                    1 => {
                        let mut cluster: Vec<char> = booleans.to_vec();
                        cluster.shuffle(&mut rng);
                        cluster.truncate(rng.gen_range(1..=booleans.len()));
                        tokens.push(format!("-{}", cluster.iter().collect::<String>()));
                    }
                    2 => {
                        let short = valued.choose(&mut rng).unwrap();
                        let boolean = booleans.choose(&mut rng).unwrap();
                        tokens.push(format!("-{boolean}{short}value{}", rng.gen::<u8>()));
                    }
                    3 => {
                        let boolean = booleans.choose(&mut rng).unwrap();
                        let form = TRUE_FORMS
                            .iter()
                            .chain(FALSE_FORMS.iter())
                            .collect::<Vec<_>>();
                        tokens.push(format!("-{boolean}={}", form.choose(&mut rng).unwrap()));
                        tokens.push(format!("{}", rng.gen_range(0..2)));
                    }
                    _ => {
                        let short = valued.choose(&mut rng).unwrap();
                        tokens.push(format!("-{short}"));
                        tokens.push(format!("-{}", rng.gen::<i8>().unsigned_abs()));
                    }
                }
            }

            let refs: Vec<&str> = tokens.iter().map(String::as_str).collect();
            let once = normalize(&index, &refs).unwrap();
            let once_refs: Vec<&str> = once.iter().map(String::as_str).collect();
            let twice = normalize(&index, &once_refs).unwrap();
            assert_eq!(twice, once, "input: {tokens:?}");
        }
    }
}
