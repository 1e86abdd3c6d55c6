use chrono::Month;
use num_traits::FromPrimitive;
use std::str::FromStr;

use nom::{
    branch::alt,
    bytes::complete::tag,
    character::complete::{char, digit1, space1},
    combinator::{all_consuming, map, map_res, opt, recognize, value},
    sequence::{pair, preceded, separated_pair},
    IResult,
};

use crate::error::Result;

#[derive(Debug, Clone, PartialEq)]
pub enum Cmd {
    Next(u32),
    Prev(u32),
    Select(u32),
    Click(usize),
    Goto(i32, Month),
    Today,
    Quit,
}

fn number<T: FromStr>(input: &str) -> IResult<&str, T> {
    map_res(digit1, |digits: &str| digits.parse::<T>())(input)
}

fn year(input: &str) -> IResult<&str, i32> {
    map_res(recognize(pair(opt(char('-')), digit1)), |s: &str| {
        s.parse::<i32>()
    })(input)
}

fn month(input: &str) -> IResult<&str, Month> {
    map_res(number::<u32>, |m| Month::from_u32(m).ok_or("no such month"))(input)
}

fn repeat_count(input: &str) -> IResult<&str, u32> {
    map(opt(number::<u32>), |n| n.unwrap_or(1))(input)
}

fn keyword<'a>(
    long: &'static str,
    short: &'static str,
) -> impl FnMut(&'a str) -> IResult<&'a str, &'a str> {
    alt((tag(long), tag(short)))
}

fn with_arg<'a, O, P>(
    name: (&'static str, &'static str),
    arg: P,
) -> impl FnMut(&'a str) -> IResult<&'a str, O>
where
    P: FnMut(&'a str) -> IResult<&'a str, O>,
{
    preceded(pair(keyword(name.0, name.1), space1), arg)
}

fn command(input: &str) -> IResult<&str, Cmd> {
    alt((
        map(pair(repeat_count, keyword("next", "n")), |(n, _)| Cmd::Next(n)),
        map(pair(repeat_count, keyword("prev", "p")), |(n, _)| Cmd::Prev(n)),
        map(with_arg(("select", "s"), number::<u32>), Cmd::Select),
        map(with_arg(("click", "c"), number::<usize>), Cmd::Click),
        map(
            with_arg(("goto", "g"), separated_pair(year, char('-'), month)),
            |(y, m)| Cmd::Goto(y, m),
        ),
        value(Cmd::Today, keyword("today", "t")),
        value(Cmd::Quit, keyword("quit", "q")),
        map(number::<u32>, Cmd::Select),
    ))(input)
}

/// Parses one line of user input.
///
/// ```text
/// [count]n|next     [count]p|prev     <day>|s|select <day>
/// c|click <cell>    g|goto <year>-<month>    t|today    q|quit
/// ```
pub fn parse_command(input: &str) -> Result<Cmd> {
    let (_, cmd) = all_consuming(command)(input.trim())?;
    Ok(cmd)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn navigation() {
        assert_eq!(parse_command("n").unwrap(), Cmd::Next(1));
        assert_eq!(parse_command("next").unwrap(), Cmd::Next(1));
        assert_eq!(parse_command("12next").unwrap(), Cmd::Next(12));
        assert_eq!(parse_command(" 3p ").unwrap(), Cmd::Prev(3));
        assert_eq!(parse_command("prev").unwrap(), Cmd::Prev(1));
    }

    #[test]
    fn selection() {
        assert_eq!(parse_command("15").unwrap(), Cmd::Select(15));
        assert_eq!(parse_command("s 7").unwrap(), Cmd::Select(7));
        assert_eq!(parse_command("select  31").unwrap(), Cmd::Select(31));
        assert_eq!(parse_command("c 4").unwrap(), Cmd::Click(4));
        assert_eq!(parse_command("click 40").unwrap(), Cmd::Click(40));
    }

    #[test]
    fn goto_and_simple_commands() {
        assert_eq!(
            parse_command("g 2024-2").unwrap(),
            Cmd::Goto(2024, Month::February)
        );
        assert_eq!(
            parse_command("goto -44-03").unwrap(),
            Cmd::Goto(-44, Month::March)
        );
        assert_eq!(parse_command("t").unwrap(), Cmd::Today);
        assert_eq!(parse_command("quit").unwrap(), Cmd::Quit);
    }

    #[test]
    fn garbage_is_rejected() {
        for input in ["", "nope", "s", "goto 2024-13", "g 2024", "3q", "-5"] {
            let err = parse_command(input).unwrap_err();
            assert!(
                matches!(err.kind, ErrorKind::CommandParse),
                "accepted '{}'",
                input
            );
        }
    }
}
