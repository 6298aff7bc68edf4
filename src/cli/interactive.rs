//! Line-oriented session that keeps the form between commands

use super::{currencies, ui};
use crate::core::{Converter, CurrencyCode, FormState};
use anyhow::{Context, Result, anyhow, bail};
use std::io::Write;
use std::str::FromStr;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tracing::debug;

const HELP: &str = "\
Commands:
  amount <value>   set the amount to convert
  from <CODE>      select the source currency
  to <CODE>        select the target currency
  swap             exchange source and target currencies
  convert          convert the current amount
  show             show the current selection
  currencies       list supported currencies
  help             show this help
  quit             leave the session";

#[derive(Debug, Clone, PartialEq)]
pub enum SessionCommand {
    Amount(String),
    From(CurrencyCode),
    To(CurrencyCode),
    Swap,
    Convert,
    Show,
    Currencies,
    Help,
    Quit,
}

impl FromStr for SessionCommand {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let line = s.trim();
        let (command, arg) = match line.split_once(char::is_whitespace) {
            Some((command, arg)) => (command, arg.trim()),
            None => (line, ""),
        };

        let currency_arg = || -> Result<CurrencyCode> {
            if arg.is_empty() {
                bail!("Missing currency code for '{command}'");
            }
            arg.parse()
        };

        match command.to_lowercase().as_str() {
            "amount" | "a" => Ok(SessionCommand::Amount(arg.to_string())),
            "from" | "f" => Ok(SessionCommand::From(currency_arg()?)),
            "to" | "t" => Ok(SessionCommand::To(currency_arg()?)),
            "swap" | "s" => Ok(SessionCommand::Swap),
            "convert" | "c" => Ok(SessionCommand::Convert),
            "show" => Ok(SessionCommand::Show),
            "currencies" | "list" => Ok(SessionCommand::Currencies),
            "help" | "?" => Ok(SessionCommand::Help),
            "quit" | "exit" | "q" => Ok(SessionCommand::Quit),
            _ => Err(anyhow!(
                "Unknown command: {command}. Type 'help' for the list of commands"
            )),
        }
    }
}

pub fn describe_form(form: &FormState) -> String {
    let currency = |c: Option<CurrencyCode>| c.map_or("-".to_string(), |c| c.display_label());
    let amount = if form.has_amount() {
        form.amount.trim()
    } else {
        "-"
    };
    format!(
        "Amount: {amount} | From: {} | To: {}",
        currency(form.from),
        currency(form.to)
    )
}

/// Applies one command. Returns `false` once the session should end.
pub async fn dispatch(converter: &Converter, command: SessionCommand) -> bool {
    debug!(?command, "Session command");
    match command {
        SessionCommand::Amount(amount) => converter.set_amount(amount),
        SessionCommand::From(currency) => {
            converter.select_from(currency).await;
        }
        SessionCommand::To(currency) => {
            converter.select_to(currency).await;
        }
        SessionCommand::Swap => {
            converter.swap().await;
            println!("{}", describe_form(&converter.form()));
        }
        SessionCommand::Convert => {
            converter.convert().await;
        }
        SessionCommand::Show => println!("{}", describe_form(&converter.form())),
        SessionCommand::Currencies => currencies::run(),
        SessionCommand::Help => println!("{HELP}"),
        SessionCommand::Quit => return false,
    }
    true
}

/// Reads commands from `input` until it is exhausted or `quit` is entered.
pub async fn run_session<R>(converter: &Converter, input: R) -> Result<()>
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = input.lines();
    loop {
        print!("> ");
        std::io::stdout().flush().context("Failed to flush stdout")?;

        let Some(line) = lines.next_line().await.context("Failed to read input")? else {
            break;
        };
        if line.trim().is_empty() {
            continue;
        }

        match line.parse::<SessionCommand>() {
            Ok(command) => {
                if !dispatch(converter, command).await {
                    break;
                }
            }
            Err(e) => eprintln!("{}", ui::style_text(&e.to_string(), ui::StyleType::Error)),
        }
    }
    Ok(())
}

pub async fn run(converter: &Converter) -> Result<()> {
    println!("{}", ui::style_text("Currency converter", ui::StyleType::Title));
    println!("{HELP}\n");
    println!("{}", describe_form(&converter.form()));

    run_session(converter, BufReader::new(tokio::io::stdin())).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::terminal::TerminalRenderer;
    use crate::core::{ExchangeQuote, ExchangeRateProvider};
    use async_trait::async_trait;
    use std::sync::{Arc, Mutex};

    #[derive(Default)]
    struct FixedRateProvider {
        calls: Mutex<Vec<(CurrencyCode, CurrencyCode)>>,
    }

    #[async_trait]
    impl ExchangeRateProvider for FixedRateProvider {
        async fn latest_quote(
            &self,
            from: CurrencyCode,
            to: CurrencyCode,
        ) -> anyhow::Result<ExchangeQuote> {
            self.calls.lock().unwrap().push((from, to));
            Ok(ExchangeQuote {
                rate: 2.0,
                as_of: "Mon, 01 Jan 2024 00:00:01 +0000".to_string(),
            })
        }
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(
            "amount 12.5".parse::<SessionCommand>().unwrap(),
            SessionCommand::Amount("12.5".to_string())
        );
        assert_eq!(
            "  FROM eur ".parse::<SessionCommand>().unwrap(),
            SessionCommand::From(CurrencyCode::Eur)
        );
        assert_eq!(
            "t jpy".parse::<SessionCommand>().unwrap(),
            SessionCommand::To(CurrencyCode::Jpy)
        );
        assert_eq!(
            "amount".parse::<SessionCommand>().unwrap(),
            SessionCommand::Amount(String::new())
        );
        assert_eq!("swap".parse::<SessionCommand>().unwrap(), SessionCommand::Swap);
        assert_eq!("q".parse::<SessionCommand>().unwrap(), SessionCommand::Quit);
    }

    #[test]
    fn test_parse_errors() {
        let err = "from".parse::<SessionCommand>().unwrap_err();
        assert_eq!(err.to_string(), "Missing currency code for 'from'");

        let err = "to ABC".parse::<SessionCommand>().unwrap_err();
        assert_eq!(err.to_string(), "Unsupported currency code: ABC");

        let err = "launch".parse::<SessionCommand>().unwrap_err();
        assert!(err.to_string().starts_with("Unknown command: launch"));
    }

    #[test]
    fn test_describe_form() {
        let form = FormState::new("10", CurrencyCode::Usd, CurrencyCode::Rub);
        assert_eq!(
            describe_form(&form),
            "Amount: 10 | From: USD - US Dollar | To: RUB - Russian Ruble"
        );
        assert_eq!(
            describe_form(&FormState::default()),
            "Amount: - | From: - | To: -"
        );
    }

    #[tokio::test]
    async fn test_session_follows_form_changes() {
        let provider = Arc::new(FixedRateProvider::default());
        let converter = Converter::new(
            Arc::clone(&provider) as Arc<dyn ExchangeRateProvider>,
            Arc::new(TerminalRenderer::new()),
            FormState {
                from: Some(CurrencyCode::Usd),
                to: Some(CurrencyCode::Rub),
                ..FormState::default()
            },
        );

        let input: &[u8] = b"from gbp\namount 10\nbogus\n\nfrom eur\nswap\nquit\nconvert\n";
        run_session(&converter, input).await.unwrap();

        assert_eq!(
            *provider.calls.lock().unwrap(),
            vec![
                (CurrencyCode::Eur, CurrencyCode::Rub),
                (CurrencyCode::Rub, CurrencyCode::Eur),
            ]
        );
        let form = converter.form();
        assert_eq!(form.amount, "10");
        assert_eq!(form.from, Some(CurrencyCode::Rub));
        assert_eq!(form.to, Some(CurrencyCode::Eur));
    }
}
