// src/common/formatacao.rs
// Formatação de datas no padrão pt-BR usado pelas telas.

use chrono::{DateTime, Datelike, Local, NaiveDate, TimeZone, Weekday};

const MESES: [&str; 12] = [
    "janeiro", "fevereiro", "março", "abril", "maio", "junho",
    "julho", "agosto", "setembro", "outubro", "novembro", "dezembro",
];

/// `dd/MM/yyyy`
pub fn data_curta(data: NaiveDate) -> String {
    data.format("%d/%m/%Y").to_string()
}

/// `HH:mm` no fuso local do aparelho.
pub fn hora_curta<Tz: TimeZone>(momento: &DateTime<Tz>) -> String {
    momento.with_timezone(&Local).format("%H:%M").to_string()
}

/// `HH:mm:ss` no fuso local do aparelho.
pub fn hora_completa<Tz: TimeZone>(momento: &DateTime<Tz>) -> String {
    momento.with_timezone(&Local).format("%H:%M:%S").to_string()
}

/// Cabeçalho da tela inicial: `sexta-feira, 16 de outubro`.
pub fn dia_por_extenso(data: NaiveDate) -> String {
    format!(
        "{}, {:02} de {}",
        dia_da_semana(data.weekday()),
        data.day(),
        MESES[data.month0() as usize]
    )
}

/// Data completa do formulário: `16 de outubro de 2026`.
pub fn data_por_extenso(data: NaiveDate) -> String {
    format!(
        "{:02} de {} de {}",
        data.day(),
        MESES[data.month0() as usize],
        data.year()
    )
}

fn dia_da_semana(dia: Weekday) -> &'static str {
    match dia {
        Weekday::Mon => "segunda-feira",
        Weekday::Tue => "terça-feira",
        Weekday::Wed => "quarta-feira",
        Weekday::Thu => "quinta-feira",
        Weekday::Fri => "sexta-feira",
        Weekday::Sat => "sábado",
        Weekday::Sun => "domingo",
    }
}
