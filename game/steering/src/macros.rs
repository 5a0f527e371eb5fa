/// Getter, `set_` and `with_` accessors for `Copy` tuning parameters. `field via inner` reaches
/// into `self.inner.field`
macro_rules! tunables {
    (impl [$($gen:tt)*] $ty:ty { $($(#[$meta:meta])* $field:ident $(via $inner:ident)?: $fty:ty),* $(,)? }) => {
        impl<$($gen)*> $ty {
            paste::paste! {
                $(
                    $(#[$meta])*
                    pub fn $field(&self) -> $fty {
                        self$(.$inner)?.$field
                    }

                    pub fn [<set_ $field>](&mut self, $field: $fty) -> &mut Self {
                        self$(.$inner)?.$field = $field;
                        self
                    }

                    pub fn [<with_ $field>](mut self, $field: $fty) -> Self {
                        self$(.$inner)?.$field = $field;
                        self
                    }
                )*
            }
        }
    };
}

/// Upgrades a weak agent reference, or zeroes the output and returns early if it is gone
macro_rules! upgrade_or_zero {
    ($weak:expr, $steering:expr, $what:literal) => {
        match $weak.upgrade() {
            Some(agent) => agent,
            None => {
                common::trace!("agent has been dropped, no steering"; "agent" => $what);
                $steering.set_zero();
                return;
            }
        }
    };
}
