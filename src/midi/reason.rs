// SPDX-License-Identifier: MPL-2.0
//! Reason codes attached to auto-reconnect events.
//!
//! A code may carry a suffix after `:` (`"retry-after-failure:2"`); only the
//! prefix is looked up.

/// Text used when no reason code was given at all.
pub const DEFAULT_REASON: &str = "Reconexão automática em andamento";

/// Reason codes with a canonical description.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Reason {
    WindowLoad,
    StoredDevices,
    UsbConnect,
    WindowFocus,
    VisibilityChange,
    MidiInitialized,
    RetryAfterFailure,
    AutoReconnect,
    ManagerRegistered,
    PageReload,
}

impl Reason {
    pub const ALL: [Reason; 10] = [
        Reason::WindowLoad,
        Reason::StoredDevices,
        Reason::UsbConnect,
        Reason::WindowFocus,
        Reason::VisibilityChange,
        Reason::MidiInitialized,
        Reason::RetryAfterFailure,
        Reason::AutoReconnect,
        Reason::ManagerRegistered,
        Reason::PageReload,
    ];

    /// Looks up a code, ignoring anything after the first `:`.
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        let base = code.split(':').next().unwrap_or(code);
        Self::ALL.into_iter().find(|reason| reason.code() == base)
    }

    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Reason::WindowLoad => "window-load",
            Reason::StoredDevices => "stored-devices",
            Reason::UsbConnect => "usb-connect",
            Reason::WindowFocus => "window-focus",
            Reason::VisibilityChange => "visibilitychange",
            Reason::MidiInitialized => "midi-initialized",
            Reason::RetryAfterFailure => "retry-after-failure",
            Reason::AutoReconnect => "auto-reconnect",
            Reason::ManagerRegistered => "manager-registered",
            Reason::PageReload => "page-reload",
        }
    }

    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            Reason::WindowLoad => "Reconexão após atualizar a página",
            Reason::StoredDevices => "Reconhecido a partir da última sessão",
            Reason::UsbConnect => "Dispositivo USB reconectado",
            Reason::WindowFocus => "Reconexão ao voltar para a aba ativa",
            Reason::VisibilityChange => "Reconexão retomada ao reabrir a aba",
            Reason::MidiInitialized => "Sistema MIDI reinicializado automaticamente",
            Reason::RetryAfterFailure => "Nova tentativa automática em andamento",
            Reason::AutoReconnect => "Reconexão automática em andamento",
            Reason::ManagerRegistered => "Reconexão após recarregar o gerenciador MIDI",
            Reason::PageReload => "Reconexão após recarregar a página",
        }
    }
}

/// Human-readable explanation for a reason code.
///
/// Unknown codes are echoed back in full inside a generic sentence; an
/// absent or empty code yields [`DEFAULT_REASON`].
#[must_use]
pub fn format_reason(code: Option<&str>) -> String {
    match code.filter(|code| !code.is_empty()) {
        None => DEFAULT_REASON.to_string(),
        Some(code) => match Reason::from_code(code) {
            Some(reason) => reason.description().to_string(),
            None => format!("Reconexão automática ({code})"),
        },
    }
}
