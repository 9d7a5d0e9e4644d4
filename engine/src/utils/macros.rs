// FICHIER : engine/src/utils/macros.rs

// La clé (ex. "EVOLVE_DONE") ne sert qu'au filtrage des logs :
// l'utilisateur ne voit que le message formaté, renvoyé par la macro.

/// Affiche une info à l'utilisateur et logue l'événement
#[macro_export]
macro_rules! user_info {
    ($key:expr, $($arg:tt)+) => {{
        let full_msg = format!($($arg)+);
        println!("{}", full_msg);
        tracing::info!(event = "user_notification", key = $key, message = %full_msg);
        full_msg
    }};
}

/// Affiche un succès à l'utilisateur
#[macro_export]
macro_rules! user_success {
    ($key:expr, $($arg:tt)+) => {{
        let full_msg = format!($($arg)+);
        println!("✅ {}", full_msg);
        tracing::info!(event = "user_success", key = $key, message = %full_msg);
        full_msg
    }};
}

/// Affiche une erreur à l'utilisateur ET logue la structure technique
#[macro_export]
macro_rules! user_error {
    // Format enrichi : composant + action + erreur source
    (
        $key:expr,
        error = $err:expr,
        component = $comp:expr,
        action = $action:expr
    ) => {{
        let err = &$err;
        let full_msg = err.to_string();
        eprintln!("❌ {}", full_msg);
        tracing::error!(
            service = "evoprompt", componentName = $comp, action = $action,
            error = ?err, event = "user_error", key = $key
        );
        full_msg
    }};

    // (Doit rester en dernier pour ne pas intercepter la syntaxe enrichie)
    ($key:expr, $($arg:tt)+) => {{
        let full_msg = format!($($arg)+);
        eprintln!("❌ {}", full_msg);
        tracing::error!(event = "user_error", key = $key, message = %full_msg);
        full_msg
    }};
}
