use crate::cli::CriteriaArgs;
use crate::error::Result;
use pairscan::engine::criteria::parse::{STANDARD_QUAD_CRITERIA, parse_quad_criteria};
use std::io::Write;

pub fn run(args: CriteriaArgs) -> Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    write_criteria(&args, &mut out)
}

fn write_criteria(args: &CriteriaArgs, out: &mut impl Write) -> Result<()> {
    match &args.parse {
        Some(text) => {
            let criteria = parse_quad_criteria(text)?;
            writeln!(out, "{criteria}")?;
        }
        None => {
            for text in STANDARD_QUAD_CRITERIA {
                let criteria = parse_quad_criteria(text)?;
                writeln!(out, "{text}\t{criteria}")?;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CliError;

    #[test]
    fn parsed_criteria_are_displayed() {
        let mut out = Vec::new();
        let args = CriteriaArgs {
            parse: Some(
                "dist_co=12,dirn_co=1,index_dist_co=-11,frame_ang_co=22.5,phi_ang_co=22.5,psi_ang_co=22.5"
                    .to_string(),
            ),
        };
        write_criteria(&args, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("quad_criteria[require_matching_directions:MUST_MATCH"));
        assert!(text.contains("minimum_index_distance:11"));
    }

    #[test]
    fn standard_list_has_one_line_per_entry() {
        let mut out = Vec::new();
        write_criteria(&CriteriaArgs { parse: None }, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.lines().count(), STANDARD_QUAD_CRITERIA.len());
    }

    #[test]
    fn malformed_criteria_are_reported() {
        let mut out = Vec::new();
        let args = CriteriaArgs {
            parse: Some("dist_co=12,bogus=1".to_string()),
        };
        assert!(matches!(
            write_criteria(&args, &mut out),
            Err(CliError::Criteria(_))
        ));
    }
}
