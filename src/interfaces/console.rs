use crate::domain::event::TransactionOutcome;
use crate::error::{PosError, Result};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

const SEPARATOR: &str = "=========================";

/// The operator-facing side of the till: asks for prices and prints results.
pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R, W> Console<R, W>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub async fn banner(&mut self) -> Result<()> {
        self.say("WELCOME TO RFID-COMMERCE").await?;
        self.say("========================").await
    }

    /// Asks for the product total until a valid one is entered.
    ///
    /// Returns `None` once the input is exhausted.
    pub async fn prompt_price(&mut self) -> Result<Option<u64>> {
        loop {
            self.output
                .write_all(b"[input] What is the product total? ")
                .await?;
            self.output.flush().await?;

            let mut line = String::new();
            if self.input.read_line(&mut line).await? == 0 {
                return Ok(None);
            }

            match parse_price(&line) {
                Ok(price) => return Ok(Some(price)),
                Err(e) => self.say(&format!("[error] {}", e)).await?,
            }
        }
    }

    pub async fn ask_for_card(&mut self) -> Result<()> {
        self.say("[input] Please put card on sensor...").await
    }

    pub async fn report(&mut self, outcome: &TransactionOutcome) -> Result<()> {
        match outcome {
            TransactionOutcome::Approved { money, points } => {
                self.say("[info] Transaction successful").await?;
                self.say(&format!("{};{};", money, points)).await
            }
            TransactionOutcome::Declined { balance, price } => {
                self.say(&format!(
                    "[info] Transaction unsuccessful: balance {} is below {}",
                    balance, price
                ))
                .await
            }
        }
    }

    pub async fn end_cycle(&mut self) -> Result<()> {
        self.say(&format!("{}\n", SEPARATOR)).await
    }

    pub async fn say(&mut self, message: &str) -> Result<()> {
        self.output.write_all(message.as_bytes()).await?;
        self.output.write_all(b"\n").await?;
        self.output.flush().await?;
        Ok(())
    }

    pub fn into_inner(self) -> (R, W) {
        (self.input, self.output)
    }
}

/// Parses a whole, non-negative product total.
pub fn parse_price(input: &str) -> Result<u64> {
    let trimmed = input.trim();
    match trimmed.parse::<i64>() {
        Ok(price) if price < 0 => Err(PosError::InvalidPrice(format!(
            "{} is negative",
            price
        ))),
        Ok(price) => Ok(price as u64),
        Err(_) => Err(PosError::InvalidPrice(format!(
            "{:?} is not a whole number",
            trimmed
        ))),
    }
}
