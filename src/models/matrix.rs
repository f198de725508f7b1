/// State of a single module in a symbol under construction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Module {
    /// Not yet assigned by any build phase
    #[default]
    Unset,
    /// Dark data or error-correction module
    DataDark,
    /// Light data or error-correction module
    DataLight,
    /// Dark module of a fixed pattern or format/version area
    FunctionDark,
    /// Light module of a fixed pattern or format/version area
    FunctionLight,
}

impl Module {
    /// Function module with the given color
    pub fn function(dark: bool) -> Self {
        if dark {
            Module::FunctionDark
        } else {
            Module::FunctionLight
        }
    }

    /// Data module with the given color
    pub fn data(dark: bool) -> Self {
        if dark {
            Module::DataDark
        } else {
            Module::DataLight
        }
    }

    /// True for dark modules; unset modules render light
    pub fn is_dark(self) -> bool {
        matches!(self, Module::DataDark | Module::FunctionDark)
    }

    /// True for modules that masking and data placement must not touch
    pub fn is_function(self) -> bool {
        matches!(self, Module::FunctionDark | Module::FunctionLight)
    }

    /// True once a build phase has assigned the module
    pub fn is_set(self) -> bool {
        self != Module::Unset
    }
}

/// Square matrix of modules, addressed as (x = column, y = row)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleMatrix {
    width: usize,
    modules: Vec<Module>,
}

impl ModuleMatrix {
    /// Create a `width` x `width` matrix with every module unset
    pub fn new(width: usize) -> Self {
        Self {
            width,
            modules: vec![Module::Unset; width * width],
        }
    }

    /// Side length in modules
    pub fn width(&self) -> usize {
        self.width
    }

    /// Module at (x, y); out of bounds reads as unset
    pub fn get(&self, x: usize, y: usize) -> Module {
        if x >= self.width || y >= self.width {
            return Module::Unset;
        }
        self.modules[y * self.width + x]
    }

    /// Assign module at (x, y); out of bounds writes are ignored
    pub fn set(&mut self, x: usize, y: usize, module: Module) {
        if x >= self.width || y >= self.width {
            return;
        }
        self.modules[y * self.width + x] = module;
    }

    /// True if the module at (x, y) is dark
    pub fn is_dark(&self, x: usize, y: usize) -> bool {
        self.get(x, y).is_dark()
    }

    /// True if the module at (x, y) belongs to a function pattern
    pub fn is_function(&self, x: usize, y: usize) -> bool {
        self.get(x, y).is_function()
    }

    /// Flip the color of a data module; function and unset modules are left alone
    pub fn toggle_data(&mut self, x: usize, y: usize) {
        if x >= self.width || y >= self.width {
            return;
        }
        let cell = &mut self.modules[y * self.width + x];
        *cell = match *cell {
            Module::DataDark => Module::DataLight,
            Module::DataLight => Module::DataDark,
            other => other,
        };
    }

    /// Rows from top to bottom
    pub fn rows(&self) -> std::slice::Chunks<'_, Module> {
        self.modules.chunks(self.width.max(1))
    }

    /// Number of dark modules
    pub fn dark_count(&self) -> usize {
        self.modules.iter().filter(|m| m.is_dark()).count()
    }

    /// True when no module is left unset
    pub fn is_resolved(&self) -> bool {
        self.modules.iter().all(|m| m.is_set())
    }
}

impl Default for ModuleMatrix {
    fn default() -> Self {
        Self::new(0)
    }
}
