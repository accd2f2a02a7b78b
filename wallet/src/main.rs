use clap::{Parser, Subcommand, ValueEnum};
use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;
use walletlib::{
    display::{format_currency, format_signed, kind_label, parse_amount},
    error::{Result, WalletError},
    formats::{csv::Csv, json::Json},
    seed,
    store::JsonFileStore,
    traits::WriteFormat,
    ContactId, TransactionKind, WalletConfig, WalletLedger,
};

#[derive(Copy, Clone, Debug, ValueEnum)]
enum Fmt {
    Csv,
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "wallet", version, about = "Учебный кошелёк: баланс, переводы, история")]
struct Cli {
    /// Файл состояния кошелька
    #[arg(short = 's', long = "store", default_value = "wallet.json", global = true)]
    store: PathBuf,

    /// Файл настроек (TOML)
    #[arg(short = 'c', long = "config", global = true)]
    config: Option<PathBuf>,

    /// Подробный лог
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Войти по демо-учётке
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Выйти
    Logout,
    /// Показать текущего пользователя
    Whoami,
    /// Показать баланс
    Balance,
    /// Пополнить счёт
    Deposit { amount: String },
    /// Снять со счёта
    Withdraw { amount: String },
    /// Перевести контакту
    Send {
        #[arg(long)]
        contact: String,
        amount: String,
    },
    /// Зачислить перевод извне
    Receive {
        #[arg(long)]
        from: Option<String>,
        amount: String,
    },
    /// Список контактов
    Contacts {
        #[arg(long)]
        search: Option<String>,
    },
    /// Добавить контакт
    AddContact {
        #[arg(long)]
        name: String,
        #[arg(long)]
        alias: String,
        #[arg(long = "account")]
        account: String,
        #[arg(long)]
        bank: String,
    },
    /// Последние движения
    History {
        /// deposit, withdraw, send, receive, purchase или all
        #[arg(long, default_value = "all")]
        kind: String,
        #[arg(long, default_value_t = 30)]
        limit: usize,
    },
    /// Выгрузить историю
    Export {
        /// Выходной файл (по умолчанию stdout)
        #[arg(short = 'o', long = "output")]
        output: Option<PathBuf>,

        #[arg(long = "format", value_enum, default_value = "csv")]
        format: Fmt,
    },
}

fn parse_filter(raw: &str) -> Result<Option<TransactionKind>> {
    match raw.trim() {
        "" | "all" => Ok(None),
        other => other.parse().map(Some),
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => WalletConfig::load(path)?,
        None => WalletConfig::default(),
    };
    let store = JsonFileStore::open(&cli.store)?;
    let mut ledger = WalletLedger::open(store, config)?;

    match cli.command {
        Command::Login { email, password } => {
            ledger.session().login(&email, &password)?;
            println!("Inicio de sesión exitoso: {}", email.trim());
            Ok(())
        }
        command => {
            let user = ledger.session().require_login()?;
            dispatch(&mut ledger, command, &user)
        }
    }
}

fn dispatch(ledger: &mut WalletLedger<JsonFileStore>, command: Command, user: &str) -> Result<()> {
    let mut out = io::stdout();

    match command {
        Command::Login { .. } => {}
        Command::Logout => {
            ledger.session().logout()?;
            writeln!(out, "Sesión cerrada")?;
        }
        Command::Whoami => writeln!(out, "{user}")?,
        Command::Balance => writeln!(out, "{}", format_currency(ledger.balance()?))?,
        Command::Deposit { amount } => {
            let tx = ledger.deposit(parse_amount(&amount)?)?;
            writeln!(out, "Depositaste {}.", format_currency(tx.amount))?;
            writeln!(out, "Saldo: {}", format_currency(ledger.balance()?))?;
        }
        Command::Withdraw { amount } => {
            let tx = ledger.withdraw(parse_amount(&amount)?)?;
            writeln!(out, "Retiraste {}.", format_currency(-tx.amount))?;
            writeln!(out, "Saldo: {}", format_currency(ledger.balance()?))?;
        }
        Command::Send { contact, amount } => {
            let tx = ledger.send_to(&ContactId(contact), parse_amount(&amount)?)?;
            writeln!(out, "{} por {}.", tx.description, format_currency(-tx.amount))?;
            writeln!(out, "Saldo: {}", format_currency(ledger.balance()?))?;
        }
        Command::Receive { from, amount } => {
            let tx = ledger.receive_from(from.as_deref(), parse_amount(&amount)?)?;
            writeln!(
                out,
                "Recibiste {}. Nuevo saldo: {}.",
                format_currency(tx.amount),
                format_currency(ledger.balance()?)
            )?;
        }
        Command::Contacts { search } => {
            let contacts = ledger.search_contacts(search.as_deref().unwrap_or(""))?;
            if contacts.is_empty() {
                writeln!(out, "No hay contactos.")?;
            }
            for c in contacts {
                writeln!(
                    out,
                    "{}\t{}\tCBU: {} | Alias: {} | Banco: {}",
                    c.id, c.name, c.account_ref, c.alias, c.bank
                )?;
            }
        }
        Command::AddContact { name, alias, account, bank } => {
            let c = ledger.add_contact(&name, &alias, &account, &bank)?;
            writeln!(out, "Contacto agregado: {} ({})", c.name, c.id)?;
        }
        Command::History { kind, limit } => {
            let filter = parse_filter(&kind)?;
            let mut list = ledger.list_transactions(None)?;
            if list.is_empty() {
                list = seed::demo_history();
            }
            let shown: Vec<_> = list
                .into_iter()
                .filter(|t| filter.map_or(true, |k| t.kind == k))
                .take(limit)
                .collect();
            if shown.is_empty() {
                writeln!(out, "Sin movimientos.")?;
            }
            for t in shown {
                writeln!(
                    out,
                    "{}\t{}\t{}\t{}",
                    t.timestamp.format("%Y-%m-%d %H:%M"),
                    kind_label(t.kind),
                    t.description,
                    format_signed(t.amount)
                )?;
            }
        }
        Command::Export { output, format } => {
            let history = ledger.list_transactions(None)?;
            let mut writer: Box<dyn Write> = match output {
                Some(path) => Box::new(File::create(path)?),
                None => Box::new(io::stdout()),
            };
            match format {
                Fmt::Csv => Csv::write(&mut writer, &history),
                Fmt::Json => Json::write(&mut writer, &history),
            }?;
            writer.flush().map_err(WalletError::from)?;
        }
    }

    out.flush()?;
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) if e.is_user_error() => {
            eprintln!("error: {e}");
            ExitCode::from(1)
        }
        Err(e) => {
            tracing::error!(error = %e, "wallet command failed");
            eprintln!("error: {e}");
            ExitCode::from(2)
        }
    }
}
