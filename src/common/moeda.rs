// src/common/moeda.rs

use std::str::FromStr;

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

// Limite de dígitos aceitos no campo de valor (evita estouro ao montar os centavos)
const MAX_DIGITOS: usize = 15;

/// Formata a digitação do campo de valor em reais.
///
/// Os dígitos digitados são alinhados à direita como centavos:
/// `"1234"` vira `"R$ 12,34"`. Qualquer caractere que não seja dígito é
/// descartado, então reaplicar a função sobre a própria saída não muda nada.
/// Sem dígitos, devolve string vazia.
pub fn formatar_moeda(entrada: &str) -> String {
    let digitos: String = entrada
        .chars()
        .filter(char::is_ascii_digit)
        .take(MAX_DIGITOS)
        .collect();

    if digitos.is_empty() {
        return String::new();
    }

    // `MAX_DIGITOS` cabe com folga em um i64
    let centavos: i64 = digitos.parse().unwrap_or(0);
    formatar_reais(Decimal::new(centavos, 2))
}

/// Renderiza um valor no formato brasileiro: `R$ 1.000,50`.
pub fn formatar_reais(valor: Decimal) -> String {
    let centavos = (valor.round_dp(2) * Decimal::ONE_HUNDRED)
        .trunc()
        .to_i128()
        .unwrap_or(0);
    let sinal = if centavos < 0 { "-" } else { "" };
    let centavos = centavos.unsigned_abs();

    format!(
        "{}R$ {},{:02}",
        sinal,
        agrupar_milhares(centavos / 100),
        centavos % 100
    )
}

/// Interpreta um valor digitado (formatado ou não) como decimal.
///
/// Remove tudo que não for dígito, vírgula ou sinal e troca a vírgula
/// decimal por ponto. Devolve `None` quando não sobra um número válido.
pub fn interpretar_moeda(valor: &str) -> Option<Decimal> {
    let limpo: String = valor
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == ',' || *c == '-')
        .collect();

    if limpo.is_empty() {
        return None;
    }

    Decimal::from_str(&limpo.replacen(',', ".", 1)).ok()
}

fn agrupar_milhares(n: u128) -> String {
    let digitos = n.to_string();
    let mut saida = String::with_capacity(digitos.len() + digitos.len() / 3);
    for (i, c) in digitos.chars().enumerate() {
        if i > 0 && (digitos.len() - i) % 3 == 0 {
            saida.push('.');
        }
        saida.push(c);
    }
    saida
}
