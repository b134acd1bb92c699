//! Line-oriented prompts over any reader/writer pair.

use std::io::{BufRead, Write};

use anyhow::{Context, Result, bail};

/// One selectable answer: the value sent to the server and the text shown.
pub struct Choice {
  pub value: String,
  pub label: String,
}

impl Choice {
  pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
    Self { value: value.into(), label: label.into() }
  }

  /// A choice whose wire value is also its label.
  pub fn plain(value: impl Into<String>) -> Self {
    let value = value.into();
    Self { label: value.clone(), value }
  }
}

pub struct Prompter<R, W> {
  input:  R,
  output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
  pub fn new(input: R, output: W) -> Self { Self { input, output } }

  /// Print a line of text.
  pub fn say(&mut self, text: &str) -> Result<()> {
    writeln!(self.output, "{text}").context("writing to terminal")
  }

  fn read_line(&mut self, prompt: &str) -> Result<String> {
    write!(self.output, "{prompt} ").context("writing to terminal")?;
    self.output.flush().ok();

    let mut line = String::new();
    let n = self.input.read_line(&mut line).context("reading input")?;
    if n == 0 {
      bail!("input closed");
    }
    Ok(line.trim().to_string())
  }

  /// Ask until a non-blank answer is given.
  pub fn text(&mut self, question: &str) -> Result<String> {
    loop {
      let answer = self.read_line(&format!("{question}:"))?;
      if !answer.is_empty() {
        return Ok(answer);
      }
      self.say("  (este dato es necesario)")?;
    }
  }

  /// Show numbered choices and return the chosen value.
  pub fn choose(&mut self, question: &str, choices: &[Choice]) -> Result<String> {
    self.say(question)?;
    for (i, choice) in choices.iter().enumerate() {
      self.say(&format!("  {}) {}", i + 1, choice.label))?;
    }

    loop {
      let answer = self.read_line(">")?;
      match answer.parse::<usize>() {
        Ok(n) if (1..=choices.len()).contains(&n) => {
          return Ok(choices[n - 1].value.clone());
        }
        _ => self.say(&format!("  elige un número del 1 al {}", choices.len()))?,
      }
    }
  }

  /// Ask a yes/no question. Empty input means no.
  pub fn confirm(&mut self, question: &str) -> Result<bool> {
    loop {
      let answer = self.read_line(&format!("{question} [s/N]"))?;
      match answer.to_lowercase().as_str() {
        "s" | "si" | "sí" | "y" | "yes" => return Ok(true),
        "" | "n" | "no" => return Ok(false),
        _ => self.say("  responde s o n")?,
      }
    }
  }

  #[cfg(test)]
  pub fn into_output(self) -> W { self.output }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn prompter(input: &str) -> Prompter<&[u8], Vec<u8>> {
    Prompter::new(input.as_bytes(), Vec::new())
  }

  #[test]
  fn text_skips_blank_answers() {
    let mut p = prompter("\n  \nAna\n");
    assert_eq!(p.text("Nombre").unwrap(), "Ana");
  }

  #[test]
  fn choose_retries_out_of_range() {
    let mut p = prompter("0\nx\n2\n");
    let choices = [Choice::new("a", "Primera"), Choice::new("b", "Segunda")];
    assert_eq!(p.choose("¿Cuál?", &choices).unwrap(), "b");

    let out = String::from_utf8(p.into_output()).unwrap();
    assert!(out.contains("1) Primera"));
    assert!(out.contains("elige un número del 1 al 2"));
  }

  #[test]
  fn confirm_defaults_to_no() {
    let mut p = prompter("\nsí\n");
    assert!(!p.confirm("¿Seguro?").unwrap());
    assert!(p.confirm("¿Seguro?").unwrap());
  }

  #[test]
  fn closed_input_is_an_error() {
    let mut p = prompter("");
    assert!(p.text("Nombre").is_err());
  }
}
